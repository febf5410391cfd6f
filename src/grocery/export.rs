use std::path::Path;

use crate::error::Result;
use crate::grocery::list::GroceryList;

/// Write the grocery list to a CSV file, one row per item.
pub fn write_csv(list: &GroceryList, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["department", "item", "quantity", "meals"])?;

    for (department, items) in &list.groups {
        for item in items {
            wtr.write_record([
                department.label().to_string(),
                item.display_name(),
                item.quantity_text(),
                item.meals.join("; "),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
