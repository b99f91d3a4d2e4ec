use anyhow::Result;

pub fn fields_command() -> Result<()> {
    for name in drivelist::KNOWN_FIELDS {
        println!("{name}");
    }
    Ok(())
}
