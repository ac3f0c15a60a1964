use data_loader::RatingIndex;
use std::path::PathBuf;
use std::time::Instant;

fn main() {
    let path: PathBuf = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/TrainingRatings.txt".to_string())
        .into();

    println!("Loading ratings from {}...\n", path.display());

    let start = Instant::now();
    let index = RatingIndex::load_from_file(&path)
        .expect("Failed to load ratings");
    let means = index.compute_user_means()
        .expect("Failed to compute user means");
    let elapsed = start.elapsed();

    let (users, items, ratings) = index.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Users: {}", users);
    println!("Items: {}", items);
    println!("Ratings: {}", ratings);
    println!("User means: {}", means.len());
    println!("\nPerformance: {:.0} ratings/second",
             ratings as f64 / elapsed.as_secs_f64());
}
