fn main() -> eyre::Result<()> {
    let out_dir = std::env::var("OUT_DIR")?;
    buildsmith_codegen::build::generate("smith.toml", out_dir)?;
    Ok(())
}
