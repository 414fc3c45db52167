use dos_vfs::{DirEntry, DosFS, FsBackend, FsError, ListingSummary, format_file_size};

fn dir<B: FsBackend>(fs: &B, path: &str) -> Result<(), FsError> {
    let listing: Vec<DirEntry> = fs.list(path)?;
    println!(" Directory of {}\n", fs.full_path(path)?);
    for entry in &listing {
        let stamp = entry.modified().format("%m-%d-%Y  %I:%M%p");
        if entry.is_dir() {
            println!("{}    <DIR>          {}", stamp, entry.name());
        } else {
            println!("{}    {:>14} {}", stamp, entry.size(), entry.name());
        }
    }
    let summary = ListingSummary::from_entries(&listing);
    println!("{:8}{} File(s)    {}", "", summary.files, format_file_size(summary.bytes));
    println!("{:8}{} Dir(s)     {} free\n", "", summary.dirs, format_file_size(fs.free_space()));
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut fs = DosFS::new();

    fs.create_directory("GAMES")?;
    fs.write("GAMES\\SCORES.TXT", "AAA 9999\nBBB 4200\n")?;
    fs.copy("C:\\DOS\\README.TXT", "C:\\GAMES\\README.BAK")?;
    dir(&fs, "GAMES")?;

    fs.change_directory("GAMES")?;
    println!("{}>", fs.current_path());
    if let Err(err) = fs.remove_directory("C:\\GAMES") {
        println!("RD: {}", err);
    }
    fs.change_directory("..")?;

    for line in fs.generate_tree("C:", true)? {
        println!("{}", line);
    }

    let state = std::env::temp_dir().join("dos_state.json");
    fs.save_to_file(&state)?;
    let mut reloaded = DosFS::new();
    reloaded.load_from_file(&state)?;
    println!("\nreloaded {} bytes used", reloaded.used_space());
    std::fs::remove_file(&state)?;
    Ok(())
}
