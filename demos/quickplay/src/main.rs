//! A scripted round of wordbottle, played end to end over the durable
//! backend. Two clients share one store directory, the way two browser
//! tabs share local storage; everything each of them sees arrives
//! through the poll loop.
//!
//! Run with `RUST_LOG=debug` for the store and watcher internals.

use std::time::Duration;

use wordbottle::prelude::*;

/// Short enough that the script moves along, long enough to watch.
const POLL: Duration = Duration::from_millis(250);

fn open_client(dir: &std::path::Path) -> Result<GameClient<JsonFileBackend>, StoreError> {
    Ok(GameClient::with_configs(
        JsonFileBackend::open(dir)?,
        StoreConfig::default(),
        WatchConfig { interval: POLL },
    ))
}

/// Waits long enough for every subscriber to have seen the last write.
async fn settle() {
    tokio::time::sleep(POLL * 2).await;
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let dir = std::env::temp_dir().join("wordbottle-quickplay");
    println!("room files live in {}", dir.display());

    // ---------------------------------------------------------------
    // Lobby: alice hosts, bob and carol join with the shared code
    // ---------------------------------------------------------------

    let alice = open_client(&dir)?;
    let bob = open_client(&dir)?;

    let room = alice.create_room("alice")?;
    println!("alice opened {}", room.code);
    println!("invite: {}", alice.share_link("https://wordbottle.example")?);

    alice.on_room_update(|room| {
        println!(
            "  [poll] phase={} players={:?} guesses={}",
            room.phase,
            room.players,
            room.guesses.len()
        );
    });

    bob.join_room(&room.code, "bob")?;
    bob.join_room(&room.code, "carol")?; // carol shares bob's machine
    settle().await;

    // ---------------------------------------------------------------
    // Round: draw a master, set the secret, let the pass run
    // ---------------------------------------------------------------

    let started = alice.start_game()?;
    println!(
        "puzzle master is {}, first guesser {}",
        started.players[started.puzzle_master],
        started.players[started.current_guesser]
    );

    alice.set_secret("rainbow", "seven colours, no pot of gold")?;
    let room = alice.open_guessing()?;
    println!("clue published: {:?}", room.clue);
    settle().await;

    let (_, outcome) = alice.submit(Submission::Guess("prism".into()))?;
    println!("first guess was wrong: {outcome:?}");

    let (room, outcome) = alice.submit(Submission::Guess("RAINBOW".into()))?;
    println!("second guess: {outcome:?}");
    settle().await;

    match room.winner.as_deref() {
        Some(winner) => println!("{winner} guessed {:?} and wins", room.secret_word),
        None => println!("nobody got {:?}, the master wins", room.secret_word),
    }

    // ---------------------------------------------------------------
    // Teardown: everyone leaves, the last one out deletes the room
    // ---------------------------------------------------------------

    bob.leave_room(&room.code, "carol")?;
    bob.leave_room(&room.code, "bob")?;
    alice.leave_room(&room.code, "alice")?;

    match alice.join_room(&room.code, "dave") {
        Err(ClientError::Store(StoreError::RoomNotFound(code))) => {
            println!("room {code} is gone, the last leaver deleted it");
        }
        other => println!("expected the room to be deleted, got {other:?}"),
    }

    Ok(())
}
