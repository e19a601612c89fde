use anyhow::Result;

mod app;

fn main() -> Result<()> {
    let args = folder_levelup::cli::parse();
    app::run(args)
}
