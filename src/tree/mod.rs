//! RTF document tree
//!
//! ```text
//! DocumentTree ──owns──▶ Root ──owns──▶ Group ──owns──▶ Keyword / Control / Text / Group ...
//!      ▲                  ▲               │
//!      └──── weak ────────┴──── weak ─────┘   (parent, document root, owning tree)
//! ```
//!
//! Nodes are reference-counted handles with interior mutability, so a tree is
//! edited through shared references and is confined to one thread.

mod builder;
mod document;
mod kind;
mod node;
mod node_list;
mod options;
mod search;
mod serialize;

pub use document::DocumentTree;
pub use kind::NodeKind;
pub use node::RtfNode;
pub use node_list::NodeList;
pub use options::LoadOptions;
pub use search::NodeMatch;
