use anyhow::Result;

fn main() -> Result<()> {
    fixup_cli::main_entry()
}
