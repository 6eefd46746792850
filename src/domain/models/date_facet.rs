use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// An optional creation-date narrowing of a collection search.
///
/// The LLM supplies this as a JSON object keyed by the collection API's dotted
/// facet names (`facetCreatedDate.century` and friends); the dotted form is a
/// contractual part of the wire body, so the serde renames preserve it
/// verbatim. Decoding fails closed: an unknown key rejects the whole payload
/// instead of being silently dropped, so a misnamed field from the model
/// surfaces as an error rather than an empty filter.
///
/// Values are passed through to the API unvalidated (e.g. "19th century",
/// "1870s", "1877").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateFacet {
    #[serde(rename = "facetCreatedDate.century", skip_serializing_if = "Option::is_none")]
    century: Option<String>,

    #[serde(rename = "facetCreatedDate.decadeOfCentury", skip_serializing_if = "Option::is_none")]
    decade_of_century: Option<String>,

    #[serde(rename = "facetCreatedDate.year", skip_serializing_if = "Option::is_none")]
    year: Option<String>,
}

impl DateFacet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_century(mut self, century: impl Into<String>) -> Self {
        self.century = Some(century.into());
        self
    }

    pub fn with_decade_of_century(mut self, decade: impl Into<String>) -> Self {
        self.decade_of_century = Some(decade.into());
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn century(&self) -> Option<&str> {
        self.century.as_deref()
    }

    pub fn decade_of_century(&self) -> Option<&str> {
        self.decade_of_century.as_deref()
    }

    pub fn year(&self) -> Option<&str> {
        self.year.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.century.is_none() && self.decade_of_century.is_none() && self.year.is_none()
    }

    /// Translate each present field into one `{field, keyword}` filter entry
    /// of the collection API, prefixing the dotted facet name with
    /// `production.`. Absent fields produce no entry.
    pub fn to_filters(&self) -> Vec<Value> {
        let fields = [
            ("facetCreatedDate.century", &self.century),
            ("facetCreatedDate.decadeOfCentury", &self.decade_of_century),
            ("facetCreatedDate.year", &self.year),
        ];

        fields
            .iter()
            .filter_map(|(name, value)| {
                value.as_ref().map(|keyword| {
                    json!({
                        "field": format!("production.{name}"),
                        "keyword": keyword,
                    })
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_dotted_keys() {
        let facet: DateFacet =
            serde_json::from_value(json!({"facetCreatedDate.year": "1877"})).unwrap();
        assert_eq!(facet.year(), Some("1877"));
        assert_eq!(facet.century(), None);
    }

    #[test]
    fn rejects_unknown_keys() {
        let result: Result<DateFacet, _> =
            serde_json::from_value(json!({"facetCreatedDate.month": "July"}));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_non_object_payload() {
        let result: Result<DateFacet, _> = serde_json::from_value(json!("1877"));
        assert!(result.is_err());
    }

    #[test]
    fn filters_carry_production_prefix() {
        let facet = DateFacet::new().with_year("1877");
        let filters = facet.to_filters();
        assert_eq!(
            filters,
            vec![json!({"field": "production.facetCreatedDate.year", "keyword": "1877"})]
        );
    }

    #[test]
    fn absent_fields_produce_no_filters() {
        assert!(DateFacet::new().to_filters().is_empty());
        assert!(DateFacet::new().is_empty());
    }

    #[test]
    fn all_fields_translate_in_declaration_order() {
        let facet = DateFacet::new()
            .with_century("19th century")
            .with_decade_of_century("1870s")
            .with_year("1877");
        let filters = facet.to_filters();
        assert_eq!(filters.len(), 3);
        assert_eq!(filters[0]["field"], "production.facetCreatedDate.century");
        assert_eq!(filters[1]["field"], "production.facetCreatedDate.decadeOfCentury");
        assert_eq!(filters[2]["field"], "production.facetCreatedDate.year");
    }
}
