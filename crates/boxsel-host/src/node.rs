// Author: Dustin Pilgrim
// License: MIT

use boxsel_core::RegionMetadata;
use eventline::info;

use crate::error::Result;

/// Execution side of the region selector node: passes the image through and
/// emits the selection metadata, remembering the last non-empty value.
#[derive(Debug, Clone)]
pub struct RegionSelectorNode {
    last_metadata: String,
}

impl Default for RegionSelectorNode {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionSelectorNode {
    pub fn new() -> Self {
        Self {
            last_metadata: unselected_json(),
        }
    }

    pub fn last_metadata(&self) -> &str {
        &self.last_metadata
    }

    pub fn process<I>(&mut self, image: I, region_metadata: Option<&str>) -> (I, String) {
        // Only whitespace-only values and the literal "{}" fall back; anything
        // else is passed through untouched.
        let provided = region_metadata.filter(|m| !m.trim().is_empty() && *m != "{}");

        let metadata = match provided {
            Some(m) => {
                self.last_metadata = m.to_string();
                self.last_metadata.clone()
            }
            None => self.last_metadata.clone(),
        };

        info!("processing selection, metadata: {}", metadata);
        (image, metadata)
    }

    /// Typed view of what [`process`](Self::process) last emitted.
    pub fn parsed(&self) -> Result<RegionMetadata> {
        Ok(RegionMetadata::from_json(&self.last_metadata)?)
    }
}

fn unselected_json() -> String {
    RegionMetadata::default()
        .to_json()
        .unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unselected() {
        let node = RegionSelectorNode::new();
        let m = node.parsed().unwrap();
        assert!(!m.selected);
        assert_eq!(m.zoom, 1.0);
        assert_eq!(m.border_width, 0);
    }

    #[test]
    fn remembers_last_non_empty_metadata() {
        let mut node = RegionSelectorNode::new();
        let json = concat!(
            r#"{"x1":1,"y1":2,"x2":30,"y2":40,"zoom":1,"#,
            r#""borderWidth":0,"borderPosition":"inside","selected":true}"#
        );

        let (img, out) = node.process("tensor", Some(json));
        assert_eq!(img, "tensor");
        assert_eq!(out, json);

        for empty in [None, Some(""), Some("   "), Some("{}")] {
            let (_, out) = node.process((), empty);
            assert_eq!(out, json);
        }
        assert!(node.parsed().unwrap().selected);
    }

    #[test]
    fn passes_values_through_verbatim() {
        let mut node = RegionSelectorNode::new();

        let padded = "  {\"selected\":false}\n";
        let (_, out) = node.process((), Some(padded));
        assert_eq!(out, padded);
        assert_eq!(node.last_metadata(), padded);

        // Only the exact "{}" is treated as empty.
        let (_, out) = node.process((), Some(" {} "));
        assert_eq!(out, " {} ");

        let (_, out) = node.process((), Some("{}"));
        assert_eq!(out, " {} ");
    }
}
