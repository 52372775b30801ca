//! kht - short alias for knownhosts-trust

fn main() -> anyhow::Result<()> {
    knownhosts_trust::run()
}
