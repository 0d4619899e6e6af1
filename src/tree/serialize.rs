//! Rendering a subtree back to RTF text.

use super::kind::NodeKind;
use super::node::RtfNode;
use crate::encoding::{default_encoding, escape_into, push_hex};
use crate::error::{RtfError, RtfResult};
use encoding_rs::Encoding;

impl RtfNode {
    /// Render this node and its subtree using the owning tree's encoding.
    ///
    /// A node that was never attached to a tree renders with
    /// [`default_encoding`].
    pub fn to_rtf(&self) -> RtfResult<String> {
        let encoding = self
            .tree()
            .map(|tree| tree.encoding())
            .unwrap_or_else(default_encoding);
        self.to_rtf_with(encoding)
    }

    /// Render this node and its subtree using `encoding` for `\'xx` escapes.
    pub fn to_rtf_with(&self, encoding: &'static Encoding) -> RtfResult<String> {
        let mut out = String::new();
        write_node(&mut out, self, None, encoding)?;
        Ok(out)
    }
}

fn write_node(
    out: &mut String,
    node: &RtfNode,
    previous: Option<&RtfNode>,
    encoding: &'static Encoding,
) -> RtfResult<()> {
    let kind = node.kind();
    match kind {
        NodeKind::Root => {}
        NodeKind::Group => out.push('{'),
        NodeKind::Keyword => {
            out.push('\\');
            escape_into(out, &node.key(), encoding)?;
            if let Some(parameter) = node.param() {
                out.push_str(&parameter.to_string());
            }
        }
        NodeKind::Control => {
            out.push('\\');
            escape_into(out, &node.key(), encoding)?;
            if let Some(parameter) = node.param() {
                if node.key_is("'") {
                    let byte = u8::try_from(parameter)
                        .map_err(|_| RtfError::InvalidByte { value: parameter })?;
                    push_hex(out, byte);
                }
            }
        }
        NodeKind::Text => {
            // Text right after a keyword needs the delimiter space back.
            if previous.is_some_and(|prev| prev.kind() != NodeKind::Control) {
                out.push(' ');
            }
            escape_into(out, &node.key(), encoding)?;
        }
    }

    let children = node.children();
    let mut previous = None;
    for child in children.iter() {
        write_node(out, child, previous, encoding)?;
        previous = Some(child);
    }

    if kind == NodeKind::Group {
        out.push('}');
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_group() {
        assert_eq!(RtfNode::group().to_rtf().unwrap(), "{}");
    }

    #[test]
    fn test_keyword_parameter() {
        assert_eq!(RtfNode::keyword("li", Some(-720)).to_rtf().unwrap(), r"\li-720");
        assert_eq!(RtfNode::keyword("b", None).to_rtf().unwrap(), r"\b");
    }

    #[test]
    fn test_hex_control() {
        assert_eq!(RtfNode::control("'", Some(0x0a)).to_rtf().unwrap(), r"\'0a");
        // Only the apostrophe control renders its parameter.
        assert_eq!(RtfNode::control("~", Some(3)).to_rtf().unwrap(), r"\~");
    }

    #[test]
    fn test_hex_control_rejects_non_byte() {
        for value in [256, 300, -1] {
            assert_eq!(
                RtfNode::control("'", Some(value)).to_rtf().unwrap_err(),
                RtfError::InvalidByte { value }
            );
        }
        assert_eq!(RtfNode::control("'", Some(255)).to_rtf().unwrap(), r"\'ff");
    }

    #[test]
    fn test_text_spacing() {
        let group = RtfNode::group();
        group.append_child(RtfNode::text("lead"));
        group.append_child(RtfNode::keyword("b", None));
        group.append_child(RtfNode::text("bold"));
        group.append_child(RtfNode::control("'", Some(0xe9)));
        group.append_child(RtfNode::text("tail"));
        assert_eq!(group.to_rtf().unwrap(), r"{lead\b bold\'e9tail}");
    }

    #[test]
    fn test_explicit_encoding() {
        let text = RtfNode::text("é");
        assert_eq!(text.to_rtf_with(encoding_rs::UTF_8).unwrap(), r"\'c3\'a9");
    }
}
