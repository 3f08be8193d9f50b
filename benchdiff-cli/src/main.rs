fn main() -> anyhow::Result<()> {
    benchdiff_cli::run()
}
