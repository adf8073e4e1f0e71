//! Helpers for unit tests that need a populated declaration index.

use std::path::Path;

use crate::frontend::json::JsonFrontend;
use crate::model::DeclarationIndex;
use crate::prelude::load_prelude;

/// Index of the prelude plus `declarations`, a JSON array of declarations.
pub(crate) fn make_test_index(declarations: &str) -> DeclarationIndex {
    let prelude = load_prelude().expect("prelude parses");
    let source = format!(r#"{{ "declarations": {} }}"#, declarations);
    let user = JsonFrontend::new()
        .parse(&source, Path::new("test.json"))
        .expect("test declarations parse");
    DeclarationIndex::build([&prelude, &user]).expect("test declarations index")
}
