use anyhow::Result;

fn main() -> Result<()> {
    chat_archive_explorer::cli::run()
}
