use chrono::{DateTime, Utc};
use regex::Regex;
use serde_json::json;
use structure::{
    Config, Errors, Location, Normalizable, Normalizer, ObjectParsable, ObjectParser, Origin,
    RFC3339, Validatable, Validator,
};

#[derive(Debug, Default, PartialEq)]
struct ContentAttributes {
    digest_md5: Option<String>,
    size: Option<i64>,
}

impl ObjectParsable for ContentAttributes {
    fn parse(&mut self, parser: &ObjectParser<'_>) {
        self.digest_md5 = parser.string("digestMD5");
        self.size = parser.int("size");
    }
}

impl Validatable for ContentAttributes {
    fn validate(&self, validator: &Validator) {
        let base64 = Regex::new("^[A-Za-z0-9+/]{22}==$").unwrap();
        validator
            .string("digestMD5", self.digest_md5.as_deref())
            .exists()
            .matches(&base64);
        validator
            .int("size", self.size)
            .exists()
            .greater_than_or_equal_to(0);
    }
}

#[derive(Debug, Default, PartialEq)]
struct Blob {
    id: Option<String>,
    status: Option<String>,
    revision: Option<i64>,
    media_type: Option<Vec<String>>,
    created_time: Option<DateTime<Utc>>,
    content_attributes: Option<ContentAttributes>,
}

impl ObjectParsable for Blob {
    fn parse(&mut self, parser: &ObjectParser<'_>) {
        self.id = parser.string("id");
        self.status = parser.string("status");
        self.revision = parser.int("revision");
        self.media_type = parser.string_array("mediaType");
        self.created_time = parser.time("createdTime", RFC3339);
        self.content_attributes = parser.parse_object("contentAttributes");
    }
}

impl Validatable for Blob {
    fn validate(&self, validator: &Validator) {
        validator.string("id", self.id.as_deref()).exists().not_empty();
        validator
            .string("status", self.status.as_deref())
            .one_of(&["available", "created"]);
        validator
            .int("revision", self.revision)
            .greater_than_or_equal_to(0);
        validator
            .string_array("mediaType", self.media_type.as_deref())
            .each_not_empty()
            .each_unique();
        validator
            .time("createdTime", self.created_time)
            .before_now();
        if validator.origin() == Origin::External {
            validator
                .with_reference("contentAttributes")
                .validate(&self.content_attributes);
        }
    }
}

impl Normalizable for Blob {
    fn normalize(&mut self, _normalizer: &Normalizer) {
        if let Some(media_type) = &mut self.media_type {
            media_type.sort();
        }
    }
}

fn located_codes(errors: &Errors) -> Vec<(String, String)> {
    errors
        .0
        .iter()
        .map(|e| {
            (
                e.location().map(ToString::to_string).unwrap_or_default(),
                e.code().to_string(),
            )
        })
        .collect()
}

#[test]
fn test_wrong_type_leaves_field_unset() {
    let input = json!({ "status": true });
    let parser = ObjectParser::from_value(&input);
    let blob: Blob = parser.parse().unwrap();

    assert_eq!(blob.status, None);
    let errors = parser.error().unwrap();
    assert_eq!(errors.0.len(), 1);
    assert_eq!(errors.0[0].location().unwrap().pointer(), "/status");
    assert_eq!(errors.0[0].code(), "type-not-string");
}

#[test]
fn test_missing_id_and_negative_revision_in_order() {
    let blob = Blob {
        revision: Some(-1),
        ..Blob::default()
    };
    let validator = Validator::new().with_origin(Origin::Store);
    validator.validate(&blob);

    let errors = validator.result().unwrap_err();
    assert_eq!(
        located_codes(&errors),
        vec![
            ("/id".to_string(), "value-not-exists".to_string()),
            ("/revision".to_string(), "value-not-in-range".to_string()),
        ]
    );
    assert_eq!(
        errors.0[1].detail(),
        "Value -1 is not greater than or equal to 0"
    );
}

#[test]
fn test_whole_graph_in_one_pass() {
    let input = json!({
        "id": "",
        "status": "deleted",
        "revision": "1",
        "mediaType": ["image/png", "", "image/png"],
        "createdTime": "2999-01-01T00:00:00Z",
        "contentAttributes": { "digestMD5": "nope", "size": -5 },
    });
    let parser = ObjectParser::from_value(&input);
    let blob: Blob = parser.parse().unwrap();
    let validator = Validator::with_reporter(parser.error_reporter().clone());
    validator.validate(&blob);

    let errors = validator.error().unwrap();
    assert_eq!(
        located_codes(&errors),
        vec![
            ("/revision".to_string(), "type-not-int".to_string()),
            ("/id".to_string(), "value-empty".to_string()),
            ("/status".to_string(), "value-not-allowed".to_string()),
            ("/mediaType/1".to_string(), "value-empty".to_string()),
            ("/mediaType/2".to_string(), "value-duplicate".to_string()),
            ("/createdTime".to_string(), "value-not-before".to_string()),
            (
                "/contentAttributes/digestMD5".to_string(),
                "value-not-matches".to_string()
            ),
            (
                "/contentAttributes/size".to_string(),
                "value-not-in-range".to_string()
            ),
        ]
    );
}

#[test]
fn test_errors_serialize_for_clients() {
    let validator = Validator::new().with_meta(json!({ "type": "blob" }));
    validator.validate(&Blob::default());
    let errors = validator.error().unwrap();

    assert_eq!(
        serde_json::to_value(&errors).unwrap(),
        json!([
            {
                "code": "value-not-exists",
                "title": "value does not exist",
                "detail": "Value does not exist",
                "source": { "pointer": "/id" },
                "meta": { "type": "blob" },
            }
        ])
    );
}

#[test]
fn test_parameter_addressing_is_flat() {
    let validator = Validator::new().with_source(Location::new_parameter());
    let media_type = vec!["".to_string()];
    validator
        .string_array("mediaType", Some(media_type.as_slice()))
        .each_not_empty();
    validator.string("id", None).exists();

    let errors = validator.error().unwrap();
    // elements of a flat parameter cannot be addressed
    assert_eq!(errors.0[0].location(), None);
    assert_eq!(errors.0[1].location().unwrap().parameter(), "id");
    assert_eq!(
        serde_json::to_value(&errors.0[1]).unwrap()["source"],
        json!({ "parameter": "id" })
    );
}

#[test]
fn test_process_full_cycle() {
    let blob: Blob = Config::default()
        .process(&json!({
            "id": "b1",
            "status": "available",
            "revision": 0,
            "mediaType": ["text/plain", "image/png"],
            "createdTime": "2020-05-01T10:00:00+02:00",
            "contentAttributes": { "digestMD5": format!("{}==", "A".repeat(22)), "size": 10 },
        }))
        .unwrap();
    assert_eq!(
        blob.media_type,
        Some(vec!["image/png".to_string(), "text/plain".to_string()])
    );
    assert_eq!(
        blob.created_time.map(|time| time.to_rfc3339()),
        Some("2020-05-01T08:00:00+00:00".to_string())
    );
}
