//! Menu-driven front end for the RM(1, r) codec.
//!
//! Input tokens come from stdin (no arguments), from a file (one argument)
//! or from the arguments themselves (several arguments), so a whole session
//! can be scripted:
//!
//! ```text
//! rm_tool 3 0.05 1 13 1 3 4 2 0
//! ```
//!
//! Prompts go to stderr and results to stdout.

use num_bigint::BigUint;
use num_traits::Zero;
use rand::thread_rng;
use reed_muller::{NoiseChannel, PgmImage, ReedMuller};
use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::str::FromStr;

type CliResult<T> = Result<T, Box<dyn StdError>>;

const OPERATIONS: &str = "\nOperations\n\
    0: Quit\n\
    1: Encode\n\
    2: Decode\n\
    3: Add noise\n\
    4: Remove noise\n\
    5: Reset\n\
    Choice:";

/// Whitespace-separated tokens pulled lazily from a line source
struct Tokens {
    source: Box<dyn BufRead>,
    pending: VecDeque<String>,
}

impl Tokens {
    fn from_args(args: Vec<String>) -> CliResult<Self> {
        let source: Box<dyn BufRead> = match args.len() {
            0 => Box::new(BufReader::new(io::stdin())),
            1 => Box::new(BufReader::new(File::open(&args[0])?)),
            _ => Box::new(io::Cursor::new(args.join(" ").into_bytes())),
        };
        Ok(Tokens {
            source,
            pending: VecDeque::new(),
        })
    }

    fn next_token(&mut self) -> CliResult<String> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.source.read_line(&mut line)? == 0 {
                return Err("unexpected end of input".into());
            }
            self.pending.extend(line.split_whitespace().map(str::to_string));
        }
        self.pending
            .pop_front()
            .ok_or_else(|| "unexpected end of input".into())
    }

    fn next<T>(&mut self) -> CliResult<T>
    where
        T: FromStr,
        T::Err: StdError + 'static,
    {
        let token = self.next_token()?;
        Ok(token.parse::<T>()?)
    }
}

fn main() -> CliResult<()> {
    let mut tokens = Tokens::from_args(std::env::args().skip(1).collect())?;

    eprintln!("Plain (r+1)-bit words are encoded on 2^r bits.");
    eprintln!("Choose r:");
    let order: usize = tokens.next()?;
    eprintln!("\nThe noise level is the probability of flipping a bit.");
    eprintln!("Choose a noise level (between 0.0 and 1.0):");
    let flip_probability: f64 = tokens.next()?;

    let code = ReedMuller::new(order)?;
    let channel = NoiseChannel::new(flip_probability)?;

    eprintln!("\nMain menu");
    eprintln!("0: Quit");
    eprintln!("1: Process a word");
    eprintln!("2: Process an image");
    match tokens.next::<u32>()? {
        1 => word_session(&code, &channel, &mut tokens),
        2 => image_session(&code, &channel, &mut tokens),
        _ => Ok(()),
    }
}

fn word_session(
    code: &ReedMuller,
    channel: &NoiseChannel,
    tokens: &mut Tokens,
) -> CliResult<()> {
    let mut rng = thread_rng();
    let mut word = BigUint::zero();
    let mut choice = 5;

    loop {
        match choice {
            1 => word = code.encode(&word)?,
            2 => word = code.decode(&word)?,
            3 => word = channel.alter(&word, code.codeword_bits(), &mut rng),
            4 => word = code.unalter(&word)?,
            5 => {
                eprintln!("\nEnter a word (decimal)");
                word = tokens.next()?;
            }
            other => eprintln!("Unknown operation {}", other),
        }
        if (1..=4).contains(&choice) {
            eprintln!("Current word (decimal):");
            println!("{}", word);
        }

        eprintln!("{}", OPERATIONS);
        choice = tokens.next::<u32>()?;
        if choice == 0 {
            return Ok(());
        }
    }
}

fn image_session(
    code: &ReedMuller,
    channel: &NoiseChannel,
    tokens: &mut Tokens,
) -> CliResult<()> {
    let mut rng = thread_rng();
    let mut image = PgmImage::from_parts(String::new(), Vec::new());
    let mut choice = 5;

    loop {
        match choice {
            1 => image = code.encode_image(&image)?,
            2 => image = code.decode_image(&image)?,
            3 => image = channel.alter_image(&image, code.codeword_bits(), &mut rng)?,
            4 => image = code.unalter_image(&image)?,
            5 => {
                eprintln!("Image file to load (pgm):");
                let path = tokens.next_token()?;
                image = PgmImage::parse(&fs::read_to_string(&path)?)?;
            }
            other => eprintln!("Unknown operation {}", other),
        }
        if (1..=4).contains(&choice) {
            eprintln!("File to save the current image to (pgm):");
            let path = tokens.next_token()?;
            fs::write(&path, image.to_text())?;
        }

        eprintln!("{}", OPERATIONS);
        choice = tokens.next::<u32>()?;
        if choice == 0 {
            return Ok(());
        }
    }
}
