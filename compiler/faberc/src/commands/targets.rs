//! The `targets` command: list output languages.

use faber_codegen::Target;

pub fn list_targets() {
    println!("Supported targets:");
    println!();
    for target in Target::ALL {
        println!("  {:<5} {} (.{})", target.name(), target.display_name(), target.extension());
    }
    println!();
    println!("Select one with `faber compile --target=<name>`.");
}
