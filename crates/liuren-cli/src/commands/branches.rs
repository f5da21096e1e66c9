use comfy_table::{ContentArrangement, Table};

use liuren_core::EarthlyBranch;

pub fn run() -> Result<(), String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Slot", "Branch", "Hours"]);

    for branch in EarthlyBranch::ALL {
        let start = branch.start_hour();
        let end = (start + 1) % 24;
        table.add_row(vec![
            branch.slot().to_string(),
            branch.label().to_string(),
            format!("{start:02}:00-{end:02}:59"),
        ]);
    }

    println!("{table}");
    Ok(())
}
