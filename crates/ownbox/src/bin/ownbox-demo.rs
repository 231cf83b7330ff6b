//! Walkthrough of ownbox's ownership and copy rules.

use std::io::{self, Write};
use std::sync::Arc;
use std::thread;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use ownbox::{AtomicOwnedBox, CopyCell, CopyPolicy, Duplicate, OwnedBox};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, mutate, reset and move exclusively owned values
    Unique,
    /// Copy a value holder under a deep or shallow policy
    Copy {
        /// Copy policy to demonstrate
        #[arg(long, value_enum, default_value_t = PolicyArg::Deep)]
        policy: PolicyArg,
    },
    /// Race several threads to take a single owned value
    Handoff {
        /// Number of competing threads
        #[arg(long, default_value_t = 4)]
        threads: usize,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Deep,
    Shallow,
}

impl From<PolicyArg> for CopyPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Deep => CopyPolicy::Deep,
            PolicyArg::Shallow => CopyPolicy::Shallow,
        }
    }
}

/// Announces its construction and destruction.
struct Test {
    data: i32,
}

impl Test {
    fn new(data: i32) -> Self {
        println!("Test constructor({})", data);
        Self { data }
    }
}

impl Drop for Test {
    fn drop(&mut self) {
        println!("Test destructor({})", self.data);
    }
}

fn unique(out: &mut impl Write) -> Result<()> {
    {
        let mut p1 = OwnedBox::new(100);
        writeln!(out, "{}", p1.get()?)?;
        *p1.get_mut()? = 200;
        writeln!(out, "{}", p1.get()?)?;
    }

    {
        let mut p1 = OwnedBox::new(100);
        writeln!(out, "{:?}", p1.as_ptr())?;
        p1.reset();
        if let Ok(value) = p1.get() {
            writeln!(out, "{}", value)?;
        }
    }

    {
        let mut vec: Vec<OwnedBox<i32>> = Vec::new();
        let mut ptr = OwnedBox::new(100);
        if let Err(err) = ptr.try_duplicate() {
            writeln!(out, "{}", err)?;
        }
        vec.push(ptr.take());
        writeln!(
            out,
            "vector owns {} box(es), ptr empty: {}",
            vec.len(),
            ptr.is_empty()
        )?;
    }

    let mut t1 = OwnedBox::new(Test::new(100));
    let _t2 = OwnedBox::new(Test::new(1000));
    let mut t3 = OwnedBox::empty();
    t3.assign_from(&mut t1);
    if t1.is_empty() {
        writeln!(out, "t1 is empty")?;
    }
    writeln!(out, "t3 holds {}", t3.get()?.data)?;
    Ok(())
}

fn copy(policy: CopyPolicy, out: &mut impl Write) -> Result<()> {
    let obj1 = CopyCell::with_policy(100, policy);
    let obj2 = obj1.duplicate();
    obj2.set(1000);

    writeln!(out, "policy:  {:?}", policy)?;
    writeln!(out, "obj1:    {}", obj1.get())?;
    writeln!(out, "obj2:    {}", obj2.get())?;
    writeln!(out, "aliased: {}", obj1.shares_storage_with(&obj2))?;

    drop(obj1);
    writeln!(out, "obj2 after obj1 dropped: {}", obj2.get())?;
    Ok(())
}

fn handoff(threads: usize, out: &mut impl Write) -> Result<()> {
    if threads == 0 {
        bail!("at least one thread is required");
    }

    let slot = Arc::new(AtomicOwnedBox::new(String::from("token")));
    let handles: Vec<_> = (0..threads)
        .map(|id| {
            let slot = Arc::clone(&slot);
            thread::spawn(move || (id, slot.take().into_inner()))
        })
        .collect();

    for handle in handles {
        let (id, taken) = handle
            .join()
            .map_err(|_| anyhow!("handoff thread panicked"))?;
        match taken {
            Some(value) => writeln!(out, "thread {} took {:?}", id, value)?,
            None => writeln!(out, "thread {} found the slot empty", id)?,
        }
    }
    Ok(())
}

fn run(command: Commands, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Unique => {
            info!("running unique ownership walkthrough");
            unique(out).context("unique ownership walkthrough failed")
        }
        Commands::Copy { policy } => {
            info!("running copy walkthrough with {:?} policy", policy);
            copy(policy.into(), out)
        }
        Commands::Handoff { threads } => {
            info!("running handoff race with {} threads", threads);
            handoff(threads, out)
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    run(cli.command, &mut io::stdout().lock())
}
