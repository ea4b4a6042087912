use serde::Serialize;
use serde_json::{Value, json};
use structure::{ArrayParsable, ArrayParser, ObjectParsable, ObjectParser};

#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct Rendition {
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<i64>,
}

impl ObjectParsable for Rendition {
    fn parse(&mut self, parser: &ObjectParser<'_>) {
        self.url = parser.string("url");
        self.width = parser.int("width");
    }
}

#[derive(Debug, Default, PartialEq, Serialize)]
struct Renditions(Vec<Rendition>);

impl ArrayParsable for Renditions {
    fn parse(&mut self, parser: &ArrayParser<'_>) {
        self.0 = parser.parse_each().into_iter().flatten().collect();
    }
}

#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct Image {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    renditions: Option<Renditions>,
}

impl ObjectParsable for Image {
    fn parse(&mut self, parser: &ObjectParser<'_>) {
        self.name = parser.string("name");
        self.visible = parser.bool("visible");
        self.ratio = parser.float64("ratio");
        self.tags = parser.string_array("tags");
        self.renditions = parser.parse_array("renditions");
        parser.not_parsed();
    }
}

fn parse(input: &Value) -> Image {
    let parser = ObjectParser::from_value(input);
    let image = parser.parse().unwrap();
    assert!(!parser.has_error(), "{:?}", parser.error());
    image
}

#[test]
fn test_parse_serialize_parse_is_stable() {
    let inputs = [
        json!({}),
        json!({ "name": "cover", "visible": false }),
        json!({
            "name": "cover",
            "visible": true,
            "ratio": 1.5,
            "tags": ["a", "b"],
            "renditions": [{ "url": "https://x/1", "width": 100 }, {}],
        }),
    ];
    for input in inputs {
        let first = parse(&input);
        let serialized = serde_json::to_value(&first).unwrap();
        let second = parse(&serialized);
        assert_eq!(first, second);
        assert_eq!(serialized, input);
    }
}
