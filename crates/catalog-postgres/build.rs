#![forbid(unsafe_code)]

/// Due to limitations in Rust's proc-macro API, there is currently no way to
/// signal that a specific procedural macro should be rerun if
/// an external file changes or is added.
///
/// Rebuilds the crate whenever the migration directory changes so that
/// `embed_migrations!` picks up new or edited migrations.
fn main() {
    println!("cargo:rerun-if-changed=./migrations");
}
