use std::path::Path;

use anyhow::{Context, Result};
use rusty_reel::config::DEFAULT_SOURCE;
use rusty_reel::data::loader::REQUIRED_COLUMNS;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

const LEADS: [&str; 4] = ["Nicolas Cage", "Meryl Streep", "Keanu Reeves", "Tilda Swinton"];

const SUPPORTING: [&str; 10] = [
    "John Cusack",
    "John Travolta",
    "Sean Connery",
    "Laura Dern",
    "Willem Dafoe",
    "Andrea Riseborough",
    "Pedro Pascal",
    "Ving Rhames",
    "Elisabeth Shue",
    "Chris Cooper",
];

const GENRES: [&str; 8] = [
    "Action", "Drama", "Comedy", "Thriller", "Horror", "Crime", "Fantasy", "Romance",
];

const WORDS: [&str; 12] = [
    "Night", "Wild", "Heart", "Gold", "Road", "Ghost", "City", "Fire", "Rider", "Moon", "Face",
    "Air",
];

const REVIEWS: [&str; 6] = [
    "An unhinged, operatic performance that holds the whole thing together.",
    "Loud, silly and more fun than it has any right to be.",
    "A quiet, surprisingly moving character study.",
    "The plot falls apart in the third act.",
    "Gorgeous to look at, but emotionally hollow.",
    "",
];

fn with_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn main() -> Result<()> {
    let n_movies = 200;
    write_sample(Path::new(DEFAULT_SOURCE), n_movies)?;
    println!("Wrote {n_movies} movies to {DEFAULT_SOURCE}");
    Ok(())
}

fn write_sample(output_path: &Path, n_movies: usize) -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    writer.write_record(REQUIRED_COLUMNS)?;

    for i in 0..n_movies {
        let title = format!("{} {}", rng.pick(&WORDS), rng.pick(&WORDS));
        let year = 1980 + rng.below(45);

        let mut genres: Vec<&str> = Vec::new();
        for _ in 0..1 + rng.below(3) {
            let g = rng.pick(&GENRES);
            if !genres.contains(&g) {
                genres.push(g);
            }
        }

        // Malformed cells on purpose so the data-quality paths get exercised.
        let rating = if rng.chance(0.05) {
            String::new()
        } else if rng.chance(0.02) {
            "N/A".to_string()
        } else {
            format!("{:.1}", 3.0 + rng.next_f64() * 6.5)
        };
        let metascore = if rng.chance(0.3) {
            String::new()
        } else {
            format!("{}", 20 + rng.below(80))
        };
        let votes = if rng.chance(0.04) {
            "unknown".to_string()
        } else {
            with_thousands(500 + rng.next_u64() % 900_000)
        };
        let cast = if rng.chance(0.03) {
            String::new()
        } else {
            let mut names = vec![rng.pick(&LEADS)];
            for _ in 0..2 + rng.below(3) {
                names.push(rng.pick(&SUPPORTING));
            }
            names.join(", ")
        };
        let poster = if rng.chance(0.1) {
            String::new()
        } else {
            format!("https://posters.example.com/{i}.jpg")
        };
        let review = rng.pick(&REVIEWS).to_string();
        let duration = if rng.chance(0.05) {
            String::new()
        } else {
            format!("{} min", 80 + rng.below(80))
        };

        let year = year.to_string();
        let genres = genres.join(", ");
        writer.write_record([
            title.as_str(),
            year.as_str(),
            genres.as_str(),
            rating.as_str(),
            metascore.as_str(),
            votes.as_str(),
            cast.as_str(),
            poster.as_str(),
            review.as_str(),
            duration.as_str(),
        ])?;
    }

    writer.flush().context("flushing CSV")?;
    Ok(())
}
