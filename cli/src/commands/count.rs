//! Word count command

use anyhow::Result;
use smart_search_core::word_count;

/// Print the script-aware word count of a text
pub async fn count_command(text: String) -> Result<()> {
    println!("{}", word_count(&text));
    Ok(())
}
