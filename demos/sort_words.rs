//! Sort the command-line arguments case-insensitively.
//!
//! cargo run --example sort_words -- beer Apple chair apple

use sorting_machine::{CaseInsensitive, SortingMachine};

fn main() {
    let mut machine = SortingMachine::new(CaseInsensitive);
    machine.extend(std::env::args().skip(1));
    println!("collected {}", machine);

    machine.change_to_extraction_mode();
    while machine.size() > 0 {
        println!("{}", machine.remove_first());
    }
}
