//! Help message display for CLI.

#![allow(clippy::print_stdout)]

use crate::pipeline::FilterSettings;

/// Print a setup hint when the source dataset cannot be found.
pub fn print_missing_dataset_help(settings: &FilterSettings) {
    let layout = settings.input_layout();

    println!(
        "No dataset found at {}. Expected layout:",
        layout.root().display()
    );
    println!();
    println!("  {}", layout.video_annotations_path().display());
    println!("  {}", layout.audio_annotations_path().display());
    println!("  {}", layout.video_path("<filename>", settings.fps).display());
    println!("  {}", layout.audio_path("<filename>").display());
    println!();
    println!("Point to another location with --input-root, or set it permanently:");
    println!("  urbansas-filter config init");
    println!(
        "  (then edit [dataset] input_root in the file shown by 'urbansas-filter config path')"
    );
    println!();
    println!("Run 'urbansas-filter -h' for all options.");
}
