//! Control message checker

use anyhow::{bail, Result};
use orbfield_runtime::ControlMessage;

pub fn run(json: &str) -> Result<()> {
    let Some(message) = ControlMessage::parse(json) else {
        bail!("Not a valid control message (expected UPDATE, STOP, PAUSE or RESUME)");
    };
    println!("{}", message.to_json()?);
    Ok(())
}
