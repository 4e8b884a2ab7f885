use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A single scraped job listing, as returned by the search service.
///
/// The scraper emits `null` for fields it could not find, so the string fields
/// accept `null` and read it as empty. Keys the scraper adds beyond the known
/// ones are kept in `extra`, in the order the service sent them. The full key
/// list of the response object is kept too, since CSV export follows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: Option<String>,
    pub link: String,
    pub full_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_posted: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip)]
    wire_keys: Vec<String>,
}

/// Field-level decoding of a job object.
#[derive(Deserialize)]
struct JobPostingFields {
    #[serde(default, deserialize_with = "null_as_empty")]
    title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    company: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    location: String,
    #[serde(default)]
    salary: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    link: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    full_description: String,
    #[serde(default)]
    date_posted: Option<String>,
    #[serde(rename = "type", default)]
    job_type: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for JobPosting {
    type Error = serde_json::Error;

    fn try_from(object: Map<String, Value>) -> Result<Self, Self::Error> {
        let wire_keys = object.keys().cloned().collect();
        let fields: JobPostingFields = serde_json::from_value(Value::Object(object))?;
        Ok(Self {
            title: fields.title,
            company: fields.company,
            location: fields.location,
            salary: fields.salary,
            link: fields.link,
            full_description: fields.full_description,
            date_posted: fields.date_posted,
            job_type: fields.job_type,
            extra: fields.extra,
            wire_keys,
        })
    }
}

impl JobPosting {
    #[cfg(test)]
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            location: location.into(),
            salary: None,
            link: String::new(),
            full_description: String::new(),
            date_posted: None,
            job_type: None,
            extra: Map::new(),
            wire_keys: Vec::new(),
        }
    }

    /// Keys of the object this posting was decoded from, in the order the
    /// service sent them. Empty for postings built locally.
    pub fn wire_keys(&self) -> &[String] {
        &self.wire_keys
    }

    /// Short label used in logs: "Data Analyst @ Acme".
    pub fn label(&self) -> String {
        format!("{} @ {}", self.title, self.company)
    }
}

/// Parameters of one job search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub role: String,
    pub location: String,
    pub count: u32,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
