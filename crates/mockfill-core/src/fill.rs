//! Placeholder fill
//!
//! A fill runs in two steps:
//! 1. [`collect_targets`] walks the selection and lists every placeholder node
//! 2. [`FillSession::run`] resolves a value per target and applies it
//!
//! Text targets are written in place once their fonts are loaded. Image
//! targets are parked in [`PendingImages`] and a download request is posted
//! to the UI; the bytes arrive later as a separate message.

use crate::document::{Document, FontName, NodeId, NodeKind};
use crate::error::{PluginError, PluginResult};
use crate::host::Host;
use crate::message::PluginMessage;
use crate::pending::PendingImages;
use indexmap::IndexMap;
use mockfill_catalog::{FieldMap, FieldTag, FieldValue};
use mockfill_picker::{CandidatePicker, PickerError};
use rand::Rng;
use serde::Serialize;

/// What to do with a placeholder node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillAction {
    /// Replace text after loading these fonts
    Text {
        /// Distinct fonts used by the node
        fonts: Vec<FontName>,
    },
    /// Request an image download for a rectangle
    Image,
}

/// Placeholder node found in the selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillTarget {
    /// Node to update
    pub node_id: NodeId,
    /// Matched tag
    pub tag: FieldTag,
    /// Update kind
    pub action: FillAction,
}

/// List placeholder nodes under the selection, in traversal order
///
/// Text tags only match text nodes and image tags only match rectangles.
#[must_use]
pub fn collect_targets(document: &Document, traverse_frames: bool) -> Vec<FillTarget> {
    let mut targets = Vec::new();
    for selected in document.selected() {
        selected.visit_leaves(traverse_frames, &mut |node| {
            let Some(tag) = FieldTag::from_node_name(&node.name) else {
                return;
            };
            let action = match &node.kind {
                NodeKind::Text { fonts, .. } if !tag.is_image() => {
                    let mut distinct: Vec<FontName> = Vec::with_capacity(fonts.len());
                    for font in fonts {
                        if !distinct.contains(font) {
                            distinct.push(font.clone());
                        }
                    }
                    FillAction::Text { fonts: distinct }
                }
                NodeKind::Rectangle { .. } if tag.is_image() => FillAction::Image,
                _ => return,
            };
            targets.push(FillTarget {
                node_id: node.id.clone(),
                tag,
                action,
            });
        });
    }
    targets
}

/// Per-fill value source
///
/// Holds one picker per choice field. Dropped when the fill ends, so picks
/// never carry over between fills.
#[derive(Debug, Clone)]
pub struct FieldResolver {
    fixed: IndexMap<FieldTag, String>,
    choices: IndexMap<FieldTag, CandidatePicker<String>>,
}

impl FieldResolver {
    /// Build pickers for `fields`
    ///
    /// `window` caps each picker's recent-use window; `None` uses the full
    /// candidate set.
    #[must_use]
    pub fn new(fields: &FieldMap, window: Option<usize>) -> Self {
        let mut fixed = IndexMap::new();
        let mut choices = IndexMap::new();
        for (tag, value) in fields.iter() {
            match value {
                FieldValue::Fixed(text) => {
                    fixed.insert(tag, text.clone());
                }
                FieldValue::Choice(candidates) => {
                    let picker = match window {
                        Some(window) => CandidatePicker::with_window(candidates.clone(), window),
                        None => CandidatePicker::new(candidates.clone()),
                    };
                    choices.insert(tag, picker);
                }
            }
        }
        Self { fixed, choices }
    }

    /// Value for the next node tagged `tag`
    ///
    /// Returns `Ok(None)` when the tag has no value at all.
    ///
    /// # Errors
    /// Returns [`PickerError::EmptyCandidateSet`] for a choice field with no candidates
    pub fn resolve<R: Rng + ?Sized>(
        &mut self,
        tag: FieldTag,
        rng: &mut R,
    ) -> Result<Option<String>, PickerError> {
        if let Some(text) = self.fixed.get(&tag) {
            return Ok(Some(text.clone()));
        }
        match self.choices.get_mut(&tag) {
            Some(picker) => picker.pick(rng).map(|value| Some(value.clone())),
            None => Ok(None),
        }
    }
}

/// Placeholder left unchanged
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedNode {
    /// Node id
    pub node_id: NodeId,
    /// Tag name
    pub tag: String,
    /// Reason
    pub reason: String,
}

/// Outcome of one fill
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FillReport {
    /// Text nodes rewritten
    pub texts_filled: usize,
    /// Download requests posted
    pub images_requested: usize,
    /// Placeholders left unchanged
    pub skipped: Vec<SkippedNode>,
}

impl FillReport {
    fn skip(&mut self, target: &FillTarget, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::warn!("Skipping {} ({}): {}", target.node_id, target.tag, reason);
        self.skipped.push(SkippedNode {
            node_id: target.node_id.clone(),
            tag: target.tag.as_str().to_string(),
            reason,
        });
    }
}

/// One fill over a document
pub struct FillSession<'a, H: ?Sized, R: ?Sized> {
    host: &'a H,
    pending: &'a mut PendingImages,
    rng: &'a mut R,
    resolver: FieldResolver,
    traverse_frames: bool,
}

impl<'a, H, R> FillSession<'a, H, R>
where
    H: Host + ?Sized,
    R: Rng + ?Sized,
{
    /// Create a session
    pub fn new(
        host: &'a H,
        pending: &'a mut PendingImages,
        rng: &'a mut R,
        resolver: FieldResolver,
    ) -> Self {
        Self {
            host,
            pending,
            rng,
            resolver,
            traverse_frames: false,
        }
    }

    /// With frame traversal on or off
    #[must_use]
    pub fn traverse_frames(mut self, enabled: bool) -> Self {
        self.traverse_frames = enabled;
        self
    }

    /// Fill every placeholder under the document selection
    ///
    /// # Errors
    /// Fails if the UI channel rejects a download request. Font failures and
    /// empty candidate sets skip the node instead.
    ///
    /// A failure stops the fill where it is. Text written before it stays
    /// written and requests posted before it stay pending; only the rejected
    /// request is withdrawn.
    pub async fn run(mut self, document: &mut Document) -> PluginResult<FillReport> {
        let targets = collect_targets(document, self.traverse_frames);
        tracing::debug!("Found {} placeholder nodes", targets.len());

        let mut report = FillReport::default();
        for target in &targets {
            let value = match self.resolver.resolve(target.tag, &mut *self.rng) {
                Ok(Some(value)) => value,
                Ok(None) => continue,
                Err(e) => {
                    report.skip(target, e.to_string());
                    continue;
                }
            };

            match &target.action {
                FillAction::Text { fonts } => {
                    if let Err(e) = self.load_fonts(fonts).await {
                        report.skip(target, e.to_string());
                        continue;
                    }
                    write_text(document, &target.node_id, value)?;
                    report.texts_filled += 1;
                    tracing::debug!("Filled {} with {}", target.node_id, target.tag);
                }
                FillAction::Image => {
                    let request = self.pending.register(target.node_id.clone());
                    let message = PluginMessage::DownloadImage {
                        node_id: request,
                        url: value,
                    };
                    if let Err(e) = self.host.post_message(message) {
                        self.pending.take(request);
                        return Err(e.into());
                    }
                    report.images_requested += 1;
                    tracing::debug!("Requested image {} for {}", request, target.node_id);
                }
            }
        }
        Ok(report)
    }

    async fn load_fonts(&self, fonts: &[FontName]) -> PluginResult<()> {
        for font in fonts {
            self.host.load_font(font).await?;
        }
        Ok(())
    }
}

fn write_text(document: &mut Document, id: &NodeId, value: String) -> PluginResult<()> {
    let node = document
        .find_mut(id)
        .ok_or_else(|| PluginError::NodeNotFound(id.clone()))?;
    match &mut node.kind {
        NodeKind::Text { characters, .. } => {
            *characters = value;
            Ok(())
        }
        other => Err(PluginError::WrongNodeKind {
            node: id.clone(),
            expected: "TEXT",
            actual: other.type_name().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SceneNode;
    use mockfill_catalog::Catalog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn font() -> FontName {
        FontName::new("Inter", "Regular")
    }

    #[test]
    fn collects_only_matching_kinds() {
        let doc = Document::new(vec![SceneNode::group(
            "g",
            "Card",
            vec![
                SceneNode::text("t1", "[data-name]", "", font()),
                SceneNode::text("t2", "[data-cover]", "", font()),
                SceneNode::rectangle("r1", "[data-cover]"),
                SceneNode::rectangle("r2", "[data-name]"),
                SceneNode::text("t3", "Title", "", font()),
            ],
        )])
        .with_selection(["g"]);

        let targets = collect_targets(&doc, false);
        let ids: Vec<&str> = targets.iter().map(|t| t.node_id.0.as_str()).collect();
        assert_eq!(ids, vec!["t1", "r1"]);
        assert_eq!(targets[1].action, FillAction::Image);
    }

    #[test]
    fn text_target_fonts_are_distinct() {
        let node = SceneNode::new(
            "t",
            "[data-name]",
            NodeKind::Text {
                characters: String::new(),
                fonts: vec![font(), FontName::new("Inter", "Bold"), font()],
            },
        );
        let doc = Document::new(vec![node]).with_selection(["t"]);

        let targets = collect_targets(&doc, false);
        assert_eq!(
            targets[0].action,
            FillAction::Text {
                fonts: vec![font(), FontName::new("Inter", "Bold")]
            }
        );
    }

    #[test]
    fn nothing_selected_means_no_targets() {
        let doc = Document::new(vec![SceneNode::text("t", "[data-name]", "", font())]);
        assert!(collect_targets(&doc, false).is_empty());
    }

    #[test]
    fn resolver_fixed_and_choice() {
        let catalog = Catalog::builtin();
        let merchant = catalog.get("merchant2").unwrap();
        let mut resolver = FieldResolver::new(&FieldMap::for_merchant(merchant), None);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            resolver.resolve(FieldTag::Name, &mut rng).unwrap(),
            Some("Frozen Sushi".to_string())
        );

        let mut tags: Vec<String> = (0..merchant.tags.len())
            .map(|_| resolver.resolve(FieldTag::Tag, &mut rng).unwrap().unwrap())
            .collect();
        tags.sort();
        let mut expected = merchant.tags.clone();
        expected.sort();
        assert_eq!(tags, expected);
    }

    #[test]
    fn resolver_empty_choice_fails() {
        let mut fields = FieldMap::default();
        fields.set(FieldTag::MenuItem, FieldValue::Choice(Vec::new()));
        let mut resolver = FieldResolver::new(&fields, None);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            resolver.resolve(FieldTag::MenuItem, &mut rng),
            Err(PickerError::EmptyCandidateSet)
        );
        assert_eq!(resolver.resolve(FieldTag::Name, &mut rng), Ok(None));
    }
}
