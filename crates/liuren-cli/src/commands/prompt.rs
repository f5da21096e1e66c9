use liuren_core::{build_prompt, compute_chain};

use super::resolve_moment;

pub fn run(at: Option<&str>) -> Result<(), String> {
    let moment = resolve_moment(at)?;
    print!("{}", build_prompt(&compute_chain(moment)));
    Ok(())
}
