//! REST client for the spreadsheet API.

use crate::{
    config::AirtableConfig,
    core::{
        normalize::columns,
        records::{Fields, SpreadsheetRecord},
    },
    errors::{Error, Result},
};
use reqwest::{Response, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// Public API root; the base id is appended to it.
pub const API_ROOT: &str = "https://api.airtable.com/v0";

/// Sort order for a listed column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

impl SortDirection {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// One sort key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortSpec {
    /// Column name
    pub field: String,
    /// Order
    pub direction: SortDirection,
}

impl SortSpec {
    /// Ascending on `field`.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending on `field`.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Query options for listing a table. Unset options are not sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Formula rows must satisfy
    pub filter_by_formula: Option<String>,
    /// Sort keys, most significant first
    pub sort: Vec<SortSpec>,
    /// Upper bound on returned rows
    pub max_records: Option<u32>,
    /// Named view to read through
    pub view: Option<String>,
}

impl ListOptions {
    /// Query string pairs in the order the API documents them.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(formula) = &self.filter_by_formula {
            pairs.push(("filterByFormula".to_string(), formula.clone()));
        }
        for (index, spec) in self.sort.iter().enumerate() {
            pairs.push((format!("sort[{index}][field]"), spec.field.clone()));
            pairs.push((
                format!("sort[{index}][direction]"),
                spec.direction.as_str().to_string(),
            ));
        }
        if let Some(max_records) = self.max_records {
            pairs.push(("maxRecords".to_string(), max_records.to_string()));
        }
        if let Some(view) = &self.view {
            pairs.push(("view".to_string(), view.clone()));
        }
        pairs
    }
}

/// Tenant tag written into the `Tenant ID` / `Tenant Name` columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tenant {
    /// Tenant key
    pub id: String,
    /// Display name
    pub name: String,
}

impl Default for Tenant {
    fn default() -> Self {
        Self {
            id: "demo".to_string(),
            name: "Demo Barn".to_string(),
        }
    }
}

/// Quotes `value` as a formula string literal.
#[must_use]
pub fn quote_formula_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Formula matching rows tagged with `tenant_id`.
#[must_use]
pub fn tenant_formula(tenant_id: &str) -> String {
    format!("{{{}}} = {}", columns::TENANT_ID, quote_formula_string(tenant_id))
}

#[derive(Deserialize)]
struct RecordList {
    #[serde(default)]
    records: Vec<SpreadsheetRecord>,
}

#[derive(Serialize)]
struct WriteRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    fields: &'a Fields,
}

#[derive(Serialize)]
struct WriteBody<'a> {
    records: [WriteRecord<'a>; 1],
}

/// Client bound to one spreadsheet base.
#[derive(Clone)]
pub struct AirtableClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl std::fmt::Debug for AirtableClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AirtableClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl AirtableClient {
    /// Builds a client against the public API.
    ///
    /// # Errors
    /// Returns `MissingConfiguration` when the base id or API key is unset.
    pub fn from_config(config: &AirtableConfig) -> Result<Self> {
        Self::with_base_url(config, API_ROOT)
    }

    /// Builds a client against `root` instead of the public API.
    ///
    /// # Errors
    /// Returns `MissingConfiguration` when the base id or API key is unset, and
    /// `Config` when `root` is not a usable URL.
    pub fn with_base_url(config: &AirtableConfig, root: &str) -> Result<Self> {
        let missing = config.missing_vars();
        if !missing.is_empty() {
            return Err(Error::MissingConfiguration { missing });
        }

        let mut base_url = Url::parse(root).map_err(|e| Error::Config {
            message: format!("Invalid API root {root}: {e}"),
        })?;
        base_url
            .path_segments_mut()
            .map_err(|()| Error::Config {
                message: format!("API root {root} cannot carry a path"),
            })?
            .pop_if_empty()
            .push(&config.base_id);

        // Client defaults only; no request timeout.
        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    fn table_url(&self, table: &str, record_id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        // The base URL was checked to be path-capable at construction.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(table);
            if let Some(id) = record_id {
                segments.push(id);
            }
        }
        url
    }

    /// Lists rows of `table`.
    ///
    /// # Errors
    /// Returns `Api` on a non-2xx answer and `Http` when the request fails.
    #[instrument(skip(self, options))]
    pub async fn list_records(
        &self,
        table: &str,
        options: &ListOptions,
    ) -> Result<Vec<SpreadsheetRecord>> {
        let url = self.table_url(table, None);
        debug!("Listing records from {}", url);

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.api_key)
            .query(&options.query_pairs())
            .send()
            .await?;
        let list: RecordList = check_status(response).await?.json().await?;

        info!("Fetched {} records from {}", list.records.len(), table);
        Ok(list.records)
    }

    /// Creates one row and returns it as stored.
    ///
    /// # Errors
    /// Returns `Api` on a non-2xx answer, `Http` when the request fails and
    /// `EmptyResponse` when no record comes back.
    #[instrument(skip(self, fields))]
    pub async fn create_record(&self, table: &str, fields: &Fields) -> Result<SpreadsheetRecord> {
        let body = WriteBody {
            records: [WriteRecord { id: None, fields }],
        };
        let response = self
            .http
            .post(self.table_url(table, None))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let record = first_record(table, response).await?;

        info!("Created record {} in {}", record.id, table);
        Ok(record)
    }

    /// Patches the given columns of row `record_id`.
    ///
    /// # Errors
    /// Returns `Api` on a non-2xx answer, `Http` when the request fails and
    /// `EmptyResponse` when no record comes back.
    #[instrument(skip(self, fields))]
    pub async fn update_record(
        &self,
        table: &str,
        record_id: &str,
        fields: &Fields,
    ) -> Result<SpreadsheetRecord> {
        let body = WriteBody {
            records: [WriteRecord {
                id: Some(record_id),
                fields,
            }],
        };
        let response = self
            .http
            .patch(self.table_url(table, None))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let record = first_record(table, response).await?;

        info!("Updated record {} in {}", record.id, table);
        Ok(record)
    }

    /// Deletes row `record_id`.
    ///
    /// # Errors
    /// Returns `Api` on a non-2xx answer and `Http` when the request fails.
    #[instrument(skip(self))]
    pub async fn delete_record(&self, table: &str, record_id: &str) -> Result<()> {
        let response = self
            .http
            .delete(self.table_url(table, Some(record_id)))
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        check_status(response).await?;

        info!("Deleted record {} from {}", record_id, table);
        Ok(())
    }

    /// Lists all rows of `table` and keeps those tagged with `tenant_id`.
    ///
    /// Filtering happens after the fetch; nothing enforces tenancy server-side.
    ///
    /// # Errors
    /// Same as [`Self::list_records`].
    pub async fn list_tenant_records(
        &self,
        table: &str,
        tenant_id: &str,
    ) -> Result<Vec<SpreadsheetRecord>> {
        let records = self.list_records(table, &ListOptions::default()).await?;
        let tenant_records: Vec<SpreadsheetRecord> = records
            .into_iter()
            .filter(|record| {
                record
                    .fields
                    .get(columns::TENANT_ID)
                    .and_then(Value::as_str)
                    == Some(tenant_id)
            })
            .collect();

        debug!(
            "Kept {} {} records for tenant {}",
            tenant_records.len(),
            table,
            tenant_id
        );
        Ok(tenant_records)
    }

    /// Creates a row tagged with `tenant`. Columns in `fields` win over the tag.
    ///
    /// # Errors
    /// Same as [`Self::create_record`].
    pub async fn create_tenant_record(
        &self,
        table: &str,
        fields: &Fields,
        tenant: &Tenant,
    ) -> Result<SpreadsheetRecord> {
        let mut tagged = Fields::new();
        tagged.insert(
            columns::TENANT_ID.to_string(),
            Value::String(tenant.id.clone()),
        );
        tagged.insert(
            columns::TENANT_NAME.to_string(),
            Value::String(tenant.name.clone()),
        );
        tagged.extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.create_record(table, &tagged).await
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = api_error_message(&body).unwrap_or(body);
    warn!("Spreadsheet API answered {}: {}", status, message);
    Err(Error::Api {
        status: status.as_u16(),
        message,
    })
}

// `{"error": {"message": ...}}` or `{"error": "NOT_FOUND"}`.
fn api_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let error = value.get("error")?;
    error
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| error.as_str())
        .map(str::to_string)
}

async fn first_record(table: &str, response: Response) -> Result<SpreadsheetRecord> {
    let list: RecordList = check_status(response).await?.json().await?;
    list.records
        .into_iter()
        .next()
        .ok_or_else(|| Error::EmptyResponse {
            table: table.to_string(),
        })
}
