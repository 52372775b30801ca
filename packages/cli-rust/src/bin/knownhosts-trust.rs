//! knownhosts-trust binary

fn main() -> anyhow::Result<()> {
    knownhosts_trust::run()
}
