//! `pndb` -- minimal, test-driven CLI surface over [pndb::database::Database]
//! (spec §6): `bulk-load`, `save`, `load`, `get`, `scan`. Exit codes follow
//! spec §6 verbatim: `0` success, `1` usage error, `2` I/O error, `3`
//! conflict.

use std::process;

use structopt::StructOpt;

use pndb::database::Database;
use pndb::error::Error;
use pndb::Result;

#[derive(Clone, StructOpt)]
#[structopt(name = "pndb", about = "Cache-oblivious lookahead array storage core")]
pub struct Opt {
    /// Path to a `.pndb` snapshot file to operate against.
    #[structopt(long = "db", default_value = "pndb.pndb")]
    db: String,

    #[structopt(subcommand)]
    subcmd: SubCommand,
}

#[derive(Clone, StructOpt)]
pub enum SubCommand {
    /// Bulk load newline-delimited `key\tvalue` pairs from a file into a
    /// fresh table and save it to `--db`.
    BulkLoad {
        /// Input file, one `key\tvalue` pair per line.
        input: String,
        /// Input is already sorted by key.
        #[structopt(long = "ordered")]
        ordered: bool,
    },
    /// Save the current `--db` table back to a (possibly new) path.
    Save {
        path: String,
    },
    /// Load `--db` from `path` and report its entry count.
    Load {
        path: String,
    },
    /// Print the value stored for `key`, if any.
    Get {
        key: String,
    },
    /// Print every `key\tvalue` pair in `[begin, end)`.
    Scan {
        begin: String,
        end: String,
    },
}

fn main() {
    env_logger::init();
    let opts = Opt::from_args();
    process::exit(match run(opts) {
        Ok(()) => 0,
        Err(Error::Conflict(msg)) => {
            eprintln!("conflict: {}", msg);
            3
        }
        Err(err @ Error::IoError(_)) | Err(err @ Error::InvalidFile(_)) | Err(err @ Error::InvalidFormat(_)) => {
            eprintln!("io error: {}", err);
            2
        }
        Err(err) => {
            eprintln!("error: {}", err);
            1
        }
    });
}

fn run(opts: Opt) -> Result<()> {
    match opts.subcmd {
        SubCommand::BulkLoad { input, ordered } => cmd_bulk_load(&opts.db, &input, ordered),
        SubCommand::Save { path } => cmd_save(&opts.db, &path),
        SubCommand::Load { path } => cmd_load(&path),
        SubCommand::Get { key } => cmd_get(&opts.db, &key),
        SubCommand::Scan { begin, end } => cmd_scan(&opts.db, &begin, &end),
    }
}

fn parse_line(line: &str) -> Result<(Vec<u8>, Vec<u8>)> {
    match line.split_once('\t') {
        Some((k, v)) => Ok((k.as_bytes().to_vec(), v.as_bytes().to_vec())),
        None => Err(Error::InvalidFile(format!("malformed line: {:?}", line))),
    }
}

fn cmd_bulk_load(db_path: &str, input: &str, ordered: bool) -> Result<()> {
    let text = std::fs::read_to_string(input)?;
    let items = text
        .lines()
        .filter(|l| !l.is_empty())
        .map(parse_line)
        .collect::<Result<Vec<_>>>()?;

    let mut db = Database::default();
    db.bulk_load(items, ordered)?;
    db.save_snapshot(db_path, false, false)?;
    println!("loaded {} entries into {}", db.table_len(), db_path);
    Ok(())
}

fn cmd_save(db_path: &str, path: &str) -> Result<()> {
    let mut db = Database::default();
    db.load_snapshot(db_path)?;
    db.save_snapshot(path, false, false)?;
    println!("saved {} entries to {}", db.table_len(), path);
    Ok(())
}

fn cmd_load(path: &str) -> Result<()> {
    let mut db = Database::default();
    db.load_snapshot(path)?;
    println!("loaded {} entries from {}", db.table_len(), path);
    Ok(())
}

fn cmd_get(db_path: &str, key: &str) -> Result<()> {
    let mut db = Database::default();
    db.load_snapshot(db_path)?;
    match db.get(key.as_bytes()) {
        Some(v) => {
            println!("{}", String::from_utf8_lossy(v));
            Ok(())
        }
        None => Err(Error::KeyNotFound(key.to_string())),
    }
}

fn cmd_scan(db_path: &str, begin: &str, end: &str) -> Result<()> {
    let mut db = Database::default();
    db.load_snapshot(db_path)?;
    let begin = begin.as_bytes();
    let end = end.as_bytes();
    for (k, v) in db.table_iter() {
        if k.as_slice() >= begin && k.as_slice() < end {
            println!("{}\t{}", String::from_utf8_lossy(&k), String::from_utf8_lossy(&v));
        }
    }
    Ok(())
}
