/// Entry point for the `const-mutant` binary.
fn main() -> anyhow::Result<()> {
    const_mutant::cli::run()
}
