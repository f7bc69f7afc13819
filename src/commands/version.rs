use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("file-count-exporter version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
