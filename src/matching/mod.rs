//! Id matching for ignore rules.
//!
//! An [`Id`] is either a literal or a full-string regex. Besides matching
//! group and artifact ids during graph traversal, ids can be compared with
//! [`Id::subsumes`] to flag ignore rules that another rule already covers.

mod id;

pub use id::{Id, IdRegex};
