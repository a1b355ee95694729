//! Barn-domain operations over the spreadsheet tables.
//!
//! Horses come back as canonical [`Horse`] values; health logs and barns are left as
//! raw rows since nothing downstream models them.

use super::client::{
    AirtableClient, ListOptions, SortSpec, Tenant, quote_formula_string, tenant_formula,
};
use crate::{
    core::{
        normalize::{columns, to_horse},
        records::{Fields, SpreadsheetRecord},
    },
    entities::Horse,
    errors::Result,
};
use chrono::NaiveDate;
use serde_json::{Value, json};
use tracing::info;

/// Table names in the barn base.
pub mod tables {
    /// Horse roster
    pub const HORSES: &str = "Horses";
    /// Health log entries
    pub const HEALTH_LOGS: &str = "Health Logs";
    /// Barns
    pub const BARNS: &str = "Barns";
}

const DATE_COLUMN: &str = "Date";
const HORSE_LINK_COLUMN: &str = "Horse";
const BARN_NAME_COLUMN: &str = "Barn Name";

/// Input for a new roster entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewHorse {
    /// Horse name
    pub name: String,
    /// Breed
    pub breed: String,
    /// Owner
    pub owner: String,
    /// Date of birth; today when absent
    pub dob: Option<NaiveDate>,
}

/// Input for a new health log entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewHealthLog {
    /// Record id of the horse
    pub horse_id: String,
    /// Free-text notes
    pub notes: String,
    /// Medication given, if any
    pub medication_given: String,
    /// Record id of the staff member logging it
    pub logged_by_id: String,
}

/// Input for a new barn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewBarn {
    /// Barn name
    pub barn_name: String,
    /// Owner name
    pub owner_name: String,
    /// Contact email
    pub contact_email: Option<String>,
    /// Phone number
    pub phone: Option<String>,
    /// Location
    pub location: Option<String>,
}

fn date_text(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn tag(fields: &mut Fields, tenant: &Tenant) {
    fields.insert(columns::TENANT_ID.to_string(), json!(tenant.id));
    fields.insert(columns::TENANT_NAME.to_string(), json!(tenant.name));
}

fn sorted_by(column: SortSpec, tenant_id: Option<&str>) -> ListOptions {
    ListOptions {
        filter_by_formula: tenant_id.map(tenant_formula),
        sort: vec![column],
        ..Default::default()
    }
}

/// Formula selecting health logs linked to `horse_name`, optionally within a tenant.
#[must_use]
pub fn health_log_formula(horse_name: &str, tenant_id: Option<&str>) -> String {
    let search = format!(
        "SEARCH({}, {{{HORSE_LINK_COLUMN}}})",
        quote_formula_string(horse_name)
    );
    match tenant_id {
        Some(tenant_id) => format!("AND({search}, {})", tenant_formula(tenant_id)),
        None => search,
    }
}

/// Barn operations bound to a client.
#[derive(Clone, Debug)]
pub struct BarnRecords {
    client: AirtableClient,
}

impl BarnRecords {
    /// Wraps `client`.
    #[must_use]
    pub const fn new(client: AirtableClient) -> Self {
        Self { client }
    }

    /// Underlying client.
    #[must_use]
    pub const fn client(&self) -> &AirtableClient {
        &self.client
    }

    /// Roster sorted by name, optionally limited to one tenant. Ages are computed on
    /// `today`.
    ///
    /// # Errors
    /// Propagates client errors.
    pub async fn fetch_horses(
        &self,
        tenant_id: Option<&str>,
        today: NaiveDate,
    ) -> Result<Vec<Horse>> {
        let options = sorted_by(SortSpec::asc(columns::NAME), tenant_id);
        let records = self.client.list_records(tables::HORSES, &options).await?;
        Ok(records.iter().map(|record| to_horse(record, today)).collect())
    }

    /// Adds a horse tagged with `tenant`.
    ///
    /// # Errors
    /// Propagates client errors.
    pub async fn add_horse(
        &self,
        horse: &NewHorse,
        tenant: &Tenant,
        today: NaiveDate,
    ) -> Result<Horse> {
        let mut fields = Fields::new();
        fields.insert(columns::NAME.to_string(), json!(horse.name));
        fields.insert(columns::BREED.to_string(), json!(horse.breed));
        fields.insert(columns::OWNER.to_string(), json!(horse.owner));
        fields.insert(
            columns::DOB.to_string(),
            json!(date_text(horse.dob.unwrap_or(today))),
        );
        tag(&mut fields, tenant);

        let record = self.client.create_record(tables::HORSES, &fields).await?;
        info!("Added horse {} as {}", horse.name, record.id);
        Ok(to_horse(&record, today))
    }

    /// Patches columns of horse `horse_id`.
    ///
    /// # Errors
    /// Propagates client errors.
    pub async fn update_horse(
        &self,
        horse_id: &str,
        fields: &Fields,
        today: NaiveDate,
    ) -> Result<Horse> {
        let record = self
            .client
            .update_record(tables::HORSES, horse_id, fields)
            .await?;
        Ok(to_horse(&record, today))
    }

    /// Removes horse `horse_id`.
    ///
    /// # Errors
    /// Propagates client errors.
    pub async fn delete_horse(&self, horse_id: &str) -> Result<()> {
        self.client.delete_record(tables::HORSES, horse_id).await
    }

    /// Health logs mentioning `horse_name`, newest first.
    ///
    /// # Errors
    /// Propagates client errors.
    pub async fn fetch_health_logs(
        &self,
        horse_name: &str,
        tenant_id: Option<&str>,
    ) -> Result<Vec<SpreadsheetRecord>> {
        let options = ListOptions {
            filter_by_formula: Some(health_log_formula(horse_name, tenant_id)),
            sort: vec![SortSpec::desc(DATE_COLUMN)],
            ..Default::default()
        };
        self.client.list_records(tables::HEALTH_LOGS, &options).await
    }

    /// Logs a health entry dated `today`.
    ///
    /// # Errors
    /// Propagates client errors.
    pub async fn add_health_log(
        &self,
        log: &NewHealthLog,
        tenant: &Tenant,
        today: NaiveDate,
    ) -> Result<SpreadsheetRecord> {
        let mut fields = Fields::new();
        fields.insert(DATE_COLUMN.to_string(), json!(date_text(today)));
        fields.insert(HORSE_LINK_COLUMN.to_string(), json!([log.horse_id]));
        fields.insert("Notes".to_string(), json!(log.notes));
        fields.insert("Medication Given".to_string(), json!(log.medication_given));
        fields.insert("Logged By".to_string(), json!([log.logged_by_id]));
        tag(&mut fields, tenant);

        self.client.create_record(tables::HEALTH_LOGS, &fields).await
    }

    /// Barns sorted by name, optionally limited to one tenant.
    ///
    /// # Errors
    /// Propagates client errors.
    pub async fn fetch_barns(&self, tenant_id: Option<&str>) -> Result<Vec<SpreadsheetRecord>> {
        let options = sorted_by(SortSpec::asc(BARN_NAME_COLUMN), tenant_id);
        self.client.list_records(tables::BARNS, &options).await
    }

    /// Adds a barn tagged with `tenant`. Unset contact columns are not sent.
    ///
    /// # Errors
    /// Propagates client errors.
    pub async fn add_barn(&self, barn: &NewBarn, tenant: &Tenant) -> Result<SpreadsheetRecord> {
        let mut fields = Fields::new();
        fields.insert(BARN_NAME_COLUMN.to_string(), json!(barn.barn_name));
        fields.insert("Owner Name".to_string(), json!(barn.owner_name));
        let optional = [
            ("Contact Email", &barn.contact_email),
            ("Phone", &barn.phone),
            ("Location", &barn.location),
        ];
        for (column, value) in optional {
            if let Some(value) = value {
                fields.insert(column.to_string(), Value::String(value.clone()));
            }
        }
        tag(&mut fields, tenant);

        self.client.create_record(tables::BARNS, &fields).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        entities::HealthStatus,
        test_utils::{airtable_config, date, query_pairs, request_body, stub_server},
    };

    fn records(server_url: &str) -> BarnRecords {
        BarnRecords::new(AirtableClient::with_base_url(&airtable_config(), server_url).unwrap())
    }

    #[test]
    fn test_health_log_formula() {
        assert_eq!(health_log_formula("Bella", None), r#"SEARCH("Bella", {Horse})"#);
        assert_eq!(
            health_log_formula("Bella", Some("demo")),
            r#"AND(SEARCH("Bella", {Horse}), {Tenant ID} = "demo")"#
        );
    }

    #[tokio::test]
    async fn test_fetch_horses_normalizes_rows() -> Result<()> {
        let server = stub_server(
            200,
            &json!({"records": [
                {"id": "recA", "fields": {"Name": "Apollo", "DOB": "2016-08-01", "Breed": "Arabian"}},
                {"id": "recB", "fields": {}}
            ]})
            .to_string(),
        )
        .await?;

        let horses = records(&server.base_url)
            .fetch_horses(Some("demo"), date(2024, 7, 31))
            .await?;
        assert_eq!(horses.len(), 2);
        assert_eq!(horses[0].name, "Apollo");
        assert_eq!(horses[0].age, 7);
        assert_eq!(horses[0].health_status, HealthStatus::Good);
        assert_eq!(horses[1].name, "Unnamed Horse");
        assert_eq!(horses[1].age, 0);

        let request = server.request.await.unwrap();
        assert!(request.starts_with("GET /appTest/Horses?"));
        assert_eq!(
            query_pairs(&request),
            [
                (
                    "filterByFormula".to_string(),
                    "{Tenant ID} = \"demo\"".to_string()
                ),
                ("sort[0][field]".to_string(), "Name".to_string()),
                ("sort[0][direction]".to_string(), "asc".to_string()),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_add_horse_defaults_dob_to_today() -> Result<()> {
        let server = stub_server(
            200,
            &json!({"records": [
                {"id": "recNew", "fields": {"Name": "Ranger", "DOB": "2024-07-31"}}
            ]})
            .to_string(),
        )
        .await?;

        let horse = records(&server.base_url)
            .add_horse(
                &NewHorse {
                    name: "Ranger".to_string(),
                    breed: "Mustang".to_string(),
                    owner: "Sam Ortiz".to_string(),
                    dob: None,
                },
                &Tenant::default(),
                date(2024, 7, 31),
            )
            .await?;
        assert_eq!(horse.id, "recNew");
        assert_eq!(horse.age, 0);

        let request = server.request.await.unwrap();
        let body: Value = serde_json::from_str(request_body(&request))?;
        assert_eq!(
            body["records"][0]["fields"],
            json!({
                "Name": "Ranger",
                "Breed": "Mustang",
                "Owner": "Sam Ortiz",
                "DOB": "2024-07-31",
                "Tenant ID": "demo",
                "Tenant Name": "Demo Barn"
            })
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_health_logs_newest_first() -> Result<()> {
        let server = stub_server(200, r#"{"records": []}"#).await?;

        let logs = records(&server.base_url)
            .fetch_health_logs("Moonlight", None)
            .await?;
        assert!(logs.is_empty());

        let request = server.request.await.unwrap();
        assert!(request.starts_with("GET /appTest/Health%20Logs?"));
        assert_eq!(
            query_pairs(&request),
            [
                (
                    "filterByFormula".to_string(),
                    r#"SEARCH("Moonlight", {Horse})"#.to_string()
                ),
                ("sort[0][field]".to_string(), "Date".to_string()),
                ("sort[0][direction]".to_string(), "desc".to_string()),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_add_health_log_links_records() -> Result<()> {
        let server = stub_server(200, r#"{"records": [{"id": "recLog", "fields": {}}]}"#).await?;

        let log = records(&server.base_url)
            .add_health_log(
                &NewHealthLog {
                    horse_id: "recHorse".to_string(),
                    notes: "Light lameness, front left".to_string(),
                    medication_given: "Bute".to_string(),
                    logged_by_id: "recStaff".to_string(),
                },
                &Tenant::default(),
                date(2024, 7, 20),
            )
            .await?;
        assert_eq!(log.id, "recLog");

        let request = server.request.await.unwrap();
        let body: Value = serde_json::from_str(request_body(&request))?;
        let fields = &body["records"][0]["fields"];
        assert_eq!(fields["Date"], "2024-07-20");
        assert_eq!(fields["Horse"], json!(["recHorse"]));
        assert_eq!(fields["Logged By"], json!(["recStaff"]));
        Ok(())
    }

    #[tokio::test]
    async fn test_add_barn_skips_unset_contacts() -> Result<()> {
        let server = stub_server(200, r#"{"records": [{"id": "recBarn", "fields": {}}]}"#).await?;

        records(&server.base_url)
            .add_barn(
                &NewBarn {
                    barn_name: "Willow Creek".to_string(),
                    owner_name: "Dana Fox".to_string(),
                    phone: Some("555-0100".to_string()),
                    ..Default::default()
                },
                &Tenant::default(),
            )
            .await?;

        let request = server.request.await.unwrap();
        let body: Value = serde_json::from_str(request_body(&request))?;
        let fields = body["records"][0]["fields"].as_object().unwrap();
        assert_eq!(fields["Phone"], "555-0100");
        assert!(!fields.contains_key("Contact Email"));
        assert!(!fields.contains_key("Location"));
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_barns_sorted_by_name() -> Result<()> {
        let server = stub_server(
            200,
            r#"{"records": [{"id": "recB1", "fields": {"Barn Name": "Oakwood"}}]}"#,
        )
        .await?;

        let barns = records(&server.base_url).fetch_barns(None).await?;
        assert_eq!(barns[0].fields["Barn Name"], "Oakwood");

        let request = server.request.await.unwrap();
        assert_eq!(
            query_pairs(&request),
            [
                ("sort[0][field]".to_string(), "Barn Name".to_string()),
                ("sort[0][direction]".to_string(), "asc".to_string()),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_horse_surfaces_not_found() -> Result<()> {
        let server = stub_server(404, r#"{"error": "NOT_FOUND"}"#).await?;

        let err = records(&server.base_url)
            .delete_horse("recGone")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::errors::Error::Api { status: 404, ref message } if message == "NOT_FOUND"
        ));
        Ok(())
    }
}
