use comfy_table::{ContentArrangement, Table};

use liuren_core::SixRen;

use super::painted;

pub fn run() -> Result<(), String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "State", "Meaning", "Lean", "Market"]);

    for state in SixRen::ORDER {
        let d = state.details();
        table.add_row(vec![
            state.index().to_string(),
            format!("{state} {}", d.glyph),
            d.meaning.to_string(),
            d.lean.to_string(),
            d.stock_implication.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    let order: Vec<String> = SixRen::ORDER.iter().map(|s| painted(*s).to_string()).collect();
    println!("  {}", order.join(" -> "));

    Ok(())
}
