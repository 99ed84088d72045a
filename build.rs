use anyhow::Result;

use vergen_gix::{BuildBuilder, Emitter, RustcBuilder};
fn main() -> Result<()> {
    let build = BuildBuilder::all_build()?;
    let rustc = RustcBuilder::all_rustc()?;
    Emitter::default()
        .add_instructions(&build)?
        .add_instructions(&rustc)?
        .emit()?;
    Ok(())
}
