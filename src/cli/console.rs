//! Console collaborators: stdin tokens in, prompts and reports out.

use std::collections::VecDeque;
use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use zrush::game::{GameEvent, SKIP_TOKEN};
use zrush::{Commander, InputError, Observer, Player, UnitKind};

/// Splits an input stream into whitespace-separated tokens.
#[derive(Debug)]
pub(crate) struct TokenReader<R> {
    source: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    pub(crate) fn new(source: R) -> Self {
        Self {
            source,
            pending: VecDeque::new(),
        }
    }

    /// Next token, reading more lines as needed.
    pub(crate) fn next_token(&mut self) -> Result<String, InputError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }
            let mut line = String::new();
            if self.source.read_line(&mut line)? == 0 {
                return Err(InputError::Closed);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
    }
}

/// [`Commander`] that prompts on `out` and reads tokens from `input`.
#[derive(Debug)]
pub(crate) struct ConsoleCommander<R, W> {
    tokens: TokenReader<R>,
    out: W,
}

impl<R: BufRead, W: Write> ConsoleCommander<R, W> {
    pub(crate) fn new(input: R, out: W) -> Self {
        Self {
            tokens: TokenReader::new(input),
            out,
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<String, InputError> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        self.tokens.next_token()
    }

    /// Ask how many players will play.
    pub(crate) fn ask_player_count(&mut self) -> Result<Option<usize>, InputError> {
        let token = self.ask("Number of players? ")?;
        Ok(token.parse().ok())
    }

    /// Write text that is not a prompt, e.g. the banner.
    pub(crate) fn say(&mut self, text: &str) -> Result<(), InputError> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> Commander for ConsoleCommander<R, W> {
    fn slot_token(&mut self, _player: &Player, _remaining: u32) -> Result<String, InputError> {
        self.ask("Select resource slot [1 (mineral), 2 (mineral), 3 (vespene gas)]? ")
    }

    fn morph_order(&mut self, _player: &Player) -> Result<String, InputError> {
        self.ask(&format!(
            "\nMorph a unit, '{SKIP_TOKEN}' to skip [d,z,h,m,s]? "
        ))
    }

    fn attack_order(&mut self, _player: &Player) -> Result<String, InputError> {
        self.ask("\nAttack with (format: 'zzh')? ")
    }

    fn attack_target(
        &mut self,
        _player: &Player,
        player_count: usize,
    ) -> Result<String, InputError> {
        self.ask(&format!("Attack player [1-{player_count}]? "))
    }
}

/// [`Observer`] that prints game events for the players.
///
/// Observers cannot fail, so the first write error is kept and handed back
/// by [`finish`](Self::finish). Nothing more is written after it.
#[derive(Debug)]
pub(crate) struct ConsoleReporter<W> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleReporter<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Flush the output and return the first write error, if any.
    pub(crate) fn finish(mut self) -> Result<(), io::Error> {
        match self.error.take() {
            Some(e) => Err(e),
            None => self.out.flush(),
        }
    }
}

impl<W: Write> Observer for ConsoleReporter<W> {
    fn notify(&mut self, event: &GameEvent) {
        if self.error.is_some() {
            return;
        }
        let Some(text) = describe(event) else {
            return;
        };
        if let Err(e) = writeln!(self.out, "{text}") {
            self.error = Some(e);
        }
    }
}

/// Player-facing text for an event, if it has any.
pub(crate) fn describe(event: &GameEvent) -> Option<String> {
    let text = match event {
        GameEvent::RoundStarted { round } => format!("\nROUND {round}\n----"),
        GameEvent::TurnStarted { player, health } => {
            format!("\nPLAYER {player} TURN\nBase health: {health}\n")
        }
        GameEvent::HarvestStarted { drones, .. } => format!("{drones} drones to use.\n"),
        GameEvent::SlotRejected { .. } => "invalid resource slot!".to_owned(),
        GameEvent::DiceRolled { dice, .. } => format!("Dice: {dice}"),
        GameEvent::Harvested { harvest, .. } => format!(
            "Gathered {} minerals and {} vespene gas.\n",
            harvest.minerals, harvest.gas
        ),
        GameEvent::MorphOffered {
            stock, affordable, ..
        } => describe_offer(stock.minerals, stock.gas, affordable),
        GameEvent::MorphRejected { .. } => "Insufficient funds!".to_owned(),
        GameEvent::Morphed { units, .. } => format!("Morphing {units}...\n"),
        GameEvent::AttackResolved {
            defender,
            attacker,
            damage,
        } => format!("Player '{defender}' is attacked by player '{attacker}' with {damage} damage..."),
        GameEvent::OffensiveRoster { units, .. } => {
            let mut text = String::from("Available offensive units:");
            for (kind, count) in units.entries().filter(|&(_, n)| n > 0) {
                let _ = write!(text, "\n\t{}", kind.quantity(count));
            }
            text
        }
        GameEvent::TargetRejected { .. } => "invalid target!".to_owned(),
        GameEvent::AttackQueued { target, record } => format!(
            "Attacking player '{target}' with {} damage...\n",
            record.damage()
        ),
        GameEvent::MorphSkipped { .. } | GameEvent::GameOver(_) => return None,
    };
    Some(text)
}

fn describe_offer(minerals: u32, gas: u32, affordable: &[UnitKind]) -> String {
    let mut text =
        format!("Minerals: {minerals}\nVespene Gas: {gas}\n\nYou can morph the following units:");
    for kind in affordable {
        let stats = kind.stats();
        let _ = write!(
            text,
            "\n{} ({} minerals, {} gas)",
            stats.name, stats.minerals, stats.gas
        );
    }
    text
}
