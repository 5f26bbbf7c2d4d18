//! Design document model
//!
//! A plain-data view of the host's node tree. Only the node kinds the fill
//! engine reads or writes carry data; everything else is [`NodeKind::Other`].
//! The JSON form uses the host's upper-case node type names, and keys the
//! model does not read are carried through untouched.

use serde::de::{self, DeserializeOwned};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Host node identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Font family and style pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontName {
    /// Family, e.g. `Inter`
    pub family: String,
    /// Style, e.g. `Regular`
    pub style: String,
}

impl FontName {
    /// Create a font name
    #[must_use]
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }
}

impl fmt::Display for FontName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.style)
    }
}

/// Hash the host assigns to decoded image data
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageHash(pub String);

/// How an image paint is fitted into its node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScaleMode {
    /// Cover the node, cropping overflow
    #[default]
    Fill,
    /// Fit inside the node
    Fit,
    /// Explicit crop
    Crop,
    /// Repeat
    Tile,
}

/// RGB colour, components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
}

/// Fill paint
///
/// Only a bare solid colour and the image paint the plugin writes are
/// modelled. Any other paint, or one carrying extra keys, is kept verbatim in
/// [`Paint::Other`].
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    /// Flat colour
    Solid {
        /// Colour
        color: Rgb,
    },
    /// Image fill
    Image {
        /// Decoded image
        image_hash: ImageHash,
        /// Fit
        scale_mode: ScaleMode,
    },
    /// Gradients, video and anything else, as host JSON
    Other(Value),
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
enum ModeledPaint {
    Solid {
        color: Rgb,
    },
    Image {
        #[serde(rename = "imageHash")]
        image_hash: ImageHash,
        #[serde(rename = "scaleMode")]
        scale_mode: ScaleMode,
    },
}

impl From<ModeledPaint> for Paint {
    fn from(paint: ModeledPaint) -> Self {
        match paint {
            ModeledPaint::Solid { color } => Paint::Solid { color },
            ModeledPaint::Image {
                image_hash,
                scale_mode,
            } => Paint::Image {
                image_hash,
                scale_mode,
            },
        }
    }
}

fn has_only_keys(value: &Value, keys: &[&str]) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.keys().all(|key| keys.contains(&key.as_str())))
}

impl Serialize for Paint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Paint::Solid { color } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "SOLID")?;
                map.serialize_entry("color", color)?;
                map.end()
            }
            Paint::Image {
                image_hash,
                scale_mode,
            } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("type", "IMAGE")?;
                map.serialize_entry("imageHash", image_hash)?;
                map.serialize_entry("scaleMode", scale_mode)?;
                map.end()
            }
            Paint::Other(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Paint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let modeled = match value.get("type").and_then(Value::as_str) {
            Some("SOLID") => has_only_keys(&value, &["type", "color"]),
            Some("IMAGE") => has_only_keys(&value, &["type", "imageHash", "scaleMode"]),
            _ => false,
        };
        if modeled {
            if let Ok(paint) = ModeledPaint::deserialize(&value) {
                return Ok(paint.into());
            }
        }
        Ok(Paint::Other(value))
    }
}

/// Node variants
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Group container
    Group {
        /// Child nodes
        children: Vec<SceneNode>,
    },
    /// Component instance
    Instance {
        /// Child nodes
        children: Vec<SceneNode>,
    },
    /// Component definition
    Component {
        /// Child nodes
        children: Vec<SceneNode>,
    },
    /// Component variant set
    ComponentSet {
        /// Child nodes
        children: Vec<SceneNode>,
    },
    /// Frame; a leaf for traversal unless frames are enabled
    Frame {
        /// Child nodes
        children: Vec<SceneNode>,
    },
    /// Text layer
    Text {
        /// Text content
        characters: String,
        /// Fonts used anywhere in the text
        fonts: Vec<FontName>,
    },
    /// Rectangle, the target for image placeholders
    Rectangle {
        /// Fills
        fills: Vec<Paint>,
    },
    /// Any other node type; its children stay in [`SceneNode::properties`]
    Other {
        /// Host type name, e.g. `ELLIPSE`
        node_type: String,
    },
}

impl NodeKind {
    /// Host type name
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            NodeKind::Group { .. } => "GROUP",
            NodeKind::Instance { .. } => "INSTANCE",
            NodeKind::Component { .. } => "COMPONENT",
            NodeKind::ComponentSet { .. } => "COMPONENT_SET",
            NodeKind::Frame { .. } => "FRAME",
            NodeKind::Text { .. } => "TEXT",
            NodeKind::Rectangle { .. } => "RECTANGLE",
            NodeKind::Other { node_type } => node_type.as_str(),
        }
    }
}

/// Node in the design tree
///
/// The JSON form is one flat object: `id`, `name`, `type`, the keys of the
/// modelled kind, then `properties`.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Host id
    pub id: NodeId,
    /// Layer name; placeholders are matched against it
    pub name: String,
    /// Variant data
    pub kind: NodeKind,
    /// Host keys the model does not read, written back unchanged.
    /// Must not repeat a modelled key.
    pub properties: Map<String, Value>,
}

fn take_field<T>(fields: &mut Map<String, Value>, key: &str) -> serde_json::Result<T>
where
    T: DeserializeOwned + Default,
{
    match fields.remove(key) {
        Some(value) => T::deserialize(value).map_err(|e| de::Error::custom(format!("{key}: {e}"))),
        None => Ok(T::default()),
    }
}

fn take_required<T>(fields: &mut Map<String, Value>, key: &'static str) -> serde_json::Result<T>
where
    T: DeserializeOwned,
{
    let value = fields
        .remove(key)
        .ok_or_else(|| <serde_json::Error as de::Error>::missing_field(key))?;
    T::deserialize(value).map_err(|e| de::Error::custom(format!("{key}: {e}")))
}

impl SceneNode {
    fn from_fields(mut fields: Map<String, Value>) -> serde_json::Result<Self> {
        let id = take_required(&mut fields, "id")?;
        let name = take_field(&mut fields, "name")?;
        let node_type: String = take_required(&mut fields, "type")?;

        let kind = match node_type.as_str() {
            "GROUP" => NodeKind::Group {
                children: take_field(&mut fields, "children")?,
            },
            "INSTANCE" => NodeKind::Instance {
                children: take_field(&mut fields, "children")?,
            },
            "COMPONENT" => NodeKind::Component {
                children: take_field(&mut fields, "children")?,
            },
            "COMPONENT_SET" => NodeKind::ComponentSet {
                children: take_field(&mut fields, "children")?,
            },
            "FRAME" => NodeKind::Frame {
                children: take_field(&mut fields, "children")?,
            },
            "TEXT" => NodeKind::Text {
                characters: take_field(&mut fields, "characters")?,
                fonts: take_field(&mut fields, "fonts")?,
            },
            "RECTANGLE" => NodeKind::Rectangle {
                fills: take_field(&mut fields, "fills")?,
            },
            _ => NodeKind::Other { node_type },
        };

        Ok(Self {
            id,
            name,
            kind,
            properties: fields,
        })
    }
}

impl<'de> Deserialize<'de> for SceneNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        Self::from_fields(fields).map_err(de::Error::custom)
    }
}

impl Serialize for SceneNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("type", self.kind.type_name())?;
        match &self.kind {
            NodeKind::Group { children }
            | NodeKind::Instance { children }
            | NodeKind::Component { children }
            | NodeKind::ComponentSet { children }
            | NodeKind::Frame { children } => map.serialize_entry("children", children)?,
            NodeKind::Text { characters, fonts } => {
                map.serialize_entry("characters", characters)?;
                map.serialize_entry("fonts", fonts)?;
            }
            NodeKind::Rectangle { fills } => map.serialize_entry("fills", fills)?,
            NodeKind::Other { .. } => {}
        }
        for (key, value) in &self.properties {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl SceneNode {
    /// Create a node
    #[must_use]
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            properties: Map::new(),
        }
    }

    /// Text node with one font
    #[must_use]
    pub fn text(id: &str, name: &str, characters: &str, font: FontName) -> Self {
        Self::new(
            id,
            name,
            NodeKind::Text {
                characters: characters.to_string(),
                fonts: vec![font],
            },
        )
    }

    /// Rectangle with no fills
    #[must_use]
    pub fn rectangle(id: &str, name: &str) -> Self {
        Self::new(id, name, NodeKind::Rectangle { fills: Vec::new() })
    }

    /// Group around `children`
    #[must_use]
    pub fn group(id: &str, name: &str, children: Vec<SceneNode>) -> Self {
        Self::new(id, name, NodeKind::Group { children })
    }

    /// Children of any container kind
    #[must_use]
    pub fn children(&self) -> Option<&[SceneNode]> {
        match &self.kind {
            NodeKind::Group { children }
            | NodeKind::Instance { children }
            | NodeKind::Component { children }
            | NodeKind::ComponentSet { children }
            | NodeKind::Frame { children } => Some(children),
            _ => None,
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<SceneNode>> {
        match &mut self.kind {
            NodeKind::Group { children }
            | NodeKind::Instance { children }
            | NodeKind::Component { children }
            | NodeKind::ComponentSet { children }
            | NodeKind::Frame { children } => Some(children),
            _ => None,
        }
    }

    /// Whether placeholder traversal descends into this node
    #[must_use]
    pub fn is_traversable(&self, traverse_frames: bool) -> bool {
        match self.kind {
            NodeKind::Group { .. }
            | NodeKind::Instance { .. }
            | NodeKind::Component { .. }
            | NodeKind::ComponentSet { .. } => true,
            NodeKind::Frame { .. } => traverse_frames,
            _ => false,
        }
    }

    /// Visit every non-traversable node below and including `self`, depth first
    pub fn visit_leaves<'a, F>(&'a self, traverse_frames: bool, visit: &mut F)
    where
        F: FnMut(&'a SceneNode),
    {
        if self.is_traversable(traverse_frames) {
            for child in self.children().unwrap_or_default() {
                child.visit_leaves(traverse_frames, visit);
            }
        } else {
            visit(self);
        }
    }

    /// Find `id` in this subtree, including inside frames
    #[must_use]
    pub fn find(&self, id: &NodeId) -> Option<&SceneNode> {
        if &self.id == id {
            return Some(self);
        }
        self.children()?.iter().find_map(|child| child.find(id))
    }

    /// Mutable [`find`](Self::find)
    pub fn find_mut(&mut self, id: &NodeId) -> Option<&mut SceneNode> {
        if &self.id == id {
            return Some(self);
        }
        self.children_mut()?
            .iter_mut()
            .find_map(|child| child.find_mut(id))
    }
}

/// Current page of a design document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Top-level nodes
    #[serde(default)]
    pub roots: Vec<SceneNode>,
    /// Selected node ids, in selection order
    #[serde(default)]
    pub selection: Vec<NodeId>,
}

impl Document {
    /// Create a document with nothing selected
    #[must_use]
    pub fn new(roots: Vec<SceneNode>) -> Self {
        Self {
            roots,
            selection: Vec::new(),
        }
    }

    /// With `ids` selected
    #[must_use]
    pub fn with_selection<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<NodeId>,
    {
        self.selection = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Find a node anywhere on the page
    #[must_use]
    pub fn find(&self, id: &NodeId) -> Option<&SceneNode> {
        self.roots.iter().find_map(|root| root.find(id))
    }

    /// Mutable [`find`](Self::find)
    pub fn find_mut(&mut self, id: &NodeId) -> Option<&mut SceneNode> {
        self.roots.iter_mut().find_map(|root| root.find_mut(id))
    }

    /// Selected nodes still present in the document
    pub fn selected(&self) -> impl Iterator<Item = &SceneNode> {
        self.selection.iter().filter_map(|id| self.find(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn inter() -> FontName {
        FontName::new("Inter", "Regular")
    }

    fn card() -> SceneNode {
        SceneNode::new(
            "1:1",
            "Card",
            NodeKind::Instance {
                children: vec![
                    SceneNode::text("1:2", "[data-name]", "Name", inter()),
                    SceneNode::group("1:3", "Meta", vec![SceneNode::rectangle("1:4", "[data-cover]")]),
                    SceneNode::new(
                        "1:5",
                        "Inner frame",
                        NodeKind::Frame {
                            children: vec![SceneNode::text("1:6", "[data-address]", "Addr", inter())],
                        },
                    ),
                ],
            },
        )
    }

    fn leaf_ids(node: &SceneNode, traverse_frames: bool) -> Vec<String> {
        let mut ids = Vec::new();
        node.visit_leaves(traverse_frames, &mut |leaf| ids.push(leaf.id.0.clone()));
        ids
    }

    #[test]
    fn frames_are_leaves_by_default() {
        assert_eq!(leaf_ids(&card(), false), vec!["1:2", "1:4", "1:5"]);
    }

    #[test]
    fn frames_traversed_when_enabled() {
        assert_eq!(leaf_ids(&card(), true), vec!["1:2", "1:4", "1:6"]);
    }

    #[test]
    fn leaf_visits_itself() {
        let text = SceneNode::text("9:9", "x", "y", inter());
        assert_eq!(leaf_ids(&text, false), vec!["9:9"]);
    }

    #[test]
    fn find_reaches_into_frames() {
        let node = card();
        assert_eq!(node.find(&NodeId::from("1:6")).unwrap().name, "[data-address]");
        assert!(node.find(&NodeId::from("missing")).is_none());
    }

    #[test]
    fn find_mut_edits_in_place() {
        let mut doc = Document::new(vec![card()]);
        if let Some(NodeKind::Text { characters, .. }) =
            doc.find_mut(&NodeId::from("1:2")).map(|n| &mut n.kind)
        {
            *characters = "Edited".to_string();
        }

        match &doc.find(&NodeId::from("1:2")).unwrap().kind {
            NodeKind::Text { characters, .. } => assert_eq!(characters, "Edited"),
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn selected_skips_missing_ids() {
        let doc = Document::new(vec![card()]).with_selection(["1:3", "gone"]);
        let ids: Vec<&str> = doc.selected().map(|n| n.id.0.as_str()).collect();
        assert_eq!(ids, vec!["1:3"]);
    }

    #[test]
    fn json_uses_host_type_names() {
        let json = r#"{
            "roots": [{
                "id": "2:1",
                "name": "Set",
                "type": "COMPONENT_SET",
                "children": [
                    { "id": "2:2", "name": "[data-cuisine]", "type": "TEXT", "characters": "x",
                      "fonts": [{ "family": "Inter", "style": "Bold" }] },
                    { "id": "2:3", "name": "Star", "type": "STAR" }
                ]
            }],
            "selection": ["2:1"]
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        let set = &doc.roots[0];

        assert_eq!(set.kind.type_name(), "COMPONENT_SET");
        let children = set.children().unwrap();
        assert_eq!(
            children[1].kind,
            NodeKind::Other {
                node_type: "STAR".to_string()
            }
        );

        let value = serde_json::to_value(&children[0]).unwrap();
        assert_eq!(value["type"], "TEXT");
        assert_eq!(value["fonts"][0]["style"], "Bold");
    }

    #[test]
    fn image_paint_json() {
        let paint = Paint::Image {
            image_hash: ImageHash("abc".to_string()),
            scale_mode: ScaleMode::Fill,
        };
        let value = serde_json::to_value(&paint).unwrap();

        assert_eq!(
            value,
            serde_json::json!({ "type": "IMAGE", "imageHash": "abc", "scaleMode": "FILL" })
        );
    }

    #[test]
    fn unmodelled_nodes_and_paints_round_trip() {
        let page = serde_json::json!({
            "roots": [{
                "id": "5:1",
                "name": "Card",
                "type": "INSTANCE",
                "children": [
                    { "id": "5:2", "name": "Badge", "type": "ELLIPSE",
                      "arcData": { "startingAngle": 0, "endingAngle": 6.28 } },
                    { "id": "5:3", "name": "Icons", "type": "BOOLEAN_OPERATION",
                      "booleanOperation": "UNION",
                      "children": [
                          { "id": "5:4", "name": "[data-name]", "type": "TEXT",
                            "characters": "x", "fonts": [], "fontSize": 14 }
                      ] },
                    { "id": "5:5", "name": "[data-cover]", "type": "RECTANGLE",
                      "cornerRadius": 8,
                      "fills": [
                          { "type": "GRADIENT_LINEAR", "gradientStops": [] },
                          { "type": "SOLID", "color": { "r": 1.0, "g": 0.5, "b": 0.0 }, "opacity": 0.5 },
                          { "type": "SOLID", "color": { "r": 0.0, "g": 0.0, "b": 1.0 } }
                      ] }
                ]
            }],
            "selection": ["5:1"]
        });

        let doc: Document = serde_json::from_value(page.clone()).unwrap();
        assert_eq!(serde_json::to_value(&doc).unwrap(), page);

        let badge = doc.find(&NodeId::from("5:2")).unwrap();
        assert_eq!(badge.kind.type_name(), "ELLIPSE");
        assert!(badge.properties.contains_key("arcData"));

        let text = doc.roots[0].children().unwrap()[1].properties["children"][0]["fontSize"].clone();
        assert_eq!(text, serde_json::json!(14));

        match &doc.find(&NodeId::from("5:5")).unwrap().kind {
            NodeKind::Rectangle { fills } => {
                assert!(matches!(fills[0], Paint::Other(_)));
                assert!(matches!(fills[1], Paint::Other(_)));
                assert_eq!(
                    fills[2],
                    Paint::Solid {
                        color: Rgb { r: 0.0, g: 0.0, b: 1.0 }
                    }
                );
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn node_without_type_is_rejected() {
        let err = serde_json::from_str::<SceneNode>(r#"{ "id": "1", "name": "x" }"#).unwrap_err();
        assert!(err.to_string().contains("type"));
    }
}
