//! Integration tests for the facade: full rounds driven end-to-end
//! through `GameClient`, plus poll-loop lifecycle.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use wordbottle::prelude::*;

// =========================================================================
// Helpers
// =========================================================================

const INTERVAL: Duration = Duration::from_millis(100);

/// An in-memory client polling fast enough for paused-time tests.
fn client() -> GameClient<MemoryBackend> {
    GameClient::with_configs(
        MemoryBackend::new(),
        StoreConfig::default(),
        WatchConfig { interval: INTERVAL },
    )
}

/// A client over a shared directory, for multi-client tests.
fn file_client(dir: &std::path::Path) -> GameClient<JsonFileBackend> {
    GameClient::with_configs(
        JsonFileBackend::open(dir).unwrap(),
        StoreConfig::default(),
        WatchConfig { interval: INTERVAL },
    )
}

/// Drives a fresh room to the guessing phase: alice hosts and masters,
/// the given guests join in order.
fn open_round(client: &GameClient<MemoryBackend>, guests: &[&str], secret: &str) -> Room {
    let room = client.create_room("alice").unwrap();
    for guest in guests {
        client.join_room(&room.code, guest).unwrap();
    }
    client.start_game().unwrap();
    // The draw is random; force alice for a predictable turn order.
    client
        .update_room(&RoomPatch {
            puzzle_master: Some(0),
            current_guesser: Some(1),
            ..RoomPatch::default()
        })
        .unwrap();
    client.set_secret(secret, "a clue").unwrap();
    client.open_guessing().unwrap()
}

async fn ticks(n: u32) {
    tokio::time::sleep(INTERVAL * n).await;
}

// =========================================================================
// Rounds through the facade
// =========================================================================

#[tokio::test]
async fn test_full_round_first_correct_guess_wins() {
    let client = client();
    open_round(&client, &["bob", "carol"], "RAINBOW");

    let (_, outcome) = client.submit(Submission::Guess("prism".into())).unwrap();
    assert!(matches!(outcome, TurnOutcome::Incorrect { next_guesser } if next_guesser == "carol"));

    let (room, outcome) = client.submit(Submission::Guess(" rainbow ".into())).unwrap();
    assert_eq!(outcome, TurnOutcome::Correct { winner: "carol".into() });
    assert_eq!(room.phase, GamePhase::Results);
    assert_eq!(room.winner.as_deref(), Some("carol"));

    // The result was persisted, not just returned.
    let stored = client.current_room().unwrap().unwrap();
    assert_eq!(stored, room);
}

#[tokio::test]
async fn test_quit_and_reveal_submissions() {
    let client = client();
    open_round(&client, &["bob"], "rainbow");

    let (room, outcome) = client.submit(Submission::Quit).unwrap();
    assert_eq!(outcome, TurnOutcome::RoundOver);
    assert_eq!(room.phase, GamePhase::Results);
    assert!(room.winner.is_none());
    assert_eq!(room.quit_players, vec!["bob"]);

    // Reveal ends a fresh round immediately.
    client.play_again().unwrap();
    client.start_game().unwrap();
    client
        .update_room(&RoomPatch {
            puzzle_master: Some(0),
            current_guesser: Some(1),
            ..RoomPatch::default()
        })
        .unwrap();
    client.set_secret("prism", "splits light").unwrap();
    client.open_guessing().unwrap();

    let (room, outcome) = client.submit(Submission::Reveal).unwrap();
    assert_eq!(outcome, TurnOutcome::RoundOver);
    assert_eq!(room.phase, GamePhase::Results);
    assert_eq!(room.secret_word, "prism");
}

#[tokio::test]
async fn test_play_again_keeps_roster_and_resets_round() {
    let client = client();
    open_round(&client, &["bob"], "rainbow");
    client.submit(Submission::Guess("rainbow".into())).unwrap();

    let room = client.play_again().unwrap();

    assert_eq!(room.phase, GamePhase::Setup);
    assert_eq!(room.players, vec!["alice", "bob"]);
    assert!(room.guesses.is_empty());
    assert!(room.winner.is_none());
}

#[tokio::test]
async fn test_rules_failure_writes_nothing() {
    let client = client();
    let room = client.create_room("alice").unwrap();
    client.join_room(&room.code, "bob").unwrap();
    let before = client.current_room().unwrap().unwrap();

    // Guessing before the round starts is a phase error.
    let result = client.submit(Submission::Guess("early".into()));
    assert!(matches!(result, Err(ClientError::Round(RoundError::WrongPhase { .. }))));

    assert_eq!(client.current_room().unwrap().unwrap(), before);
}

// =========================================================================
// Error surface
// =========================================================================

#[tokio::test]
async fn test_commands_without_room_are_no_room() {
    let client = client();
    assert!(matches!(
        client.submit(Submission::Guess("cat".into())),
        Err(ClientError::NoRoom)
    ));
    assert!(matches!(client.start_game(), Err(ClientError::NoRoom)));
    assert!(matches!(client.share_link("https://x"), Err(ClientError::NoRoom)));
}

#[tokio::test]
async fn test_store_errors_pass_through() {
    let client = client();
    let code: RoomCode = "GAME-ZZZZ".parse().unwrap();
    let result = client.join_room(&code, "bob");
    assert!(matches!(
        result,
        Err(ClientError::Store(StoreError::RoomNotFound(_)))
    ));
}

#[tokio::test]
async fn test_start_game_needs_two_players() {
    let client = client();
    client.create_room("alice").unwrap();
    let result = client.start_game();
    assert!(matches!(
        result,
        Err(ClientError::Round(RoundError::NotEnoughPlayers(1)))
    ));
}

// =========================================================================
// Share link
// =========================================================================

#[tokio::test]
async fn test_share_link_embeds_room_code() {
    let client = client();
    let room = client.create_room("alice").unwrap();

    let link = client.share_link("https://wordbottle.example/").unwrap();
    assert_eq!(link, format!("https://wordbottle.example?room={}", room.code));
}

// =========================================================================
// Polling lifecycle
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_create_room_starts_snapshot_delivery() {
    let client = client();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    client.on_room_update(move |room: &Room| {
        sink.lock().unwrap().push(room.clone());
    });

    client.create_room("alice").unwrap();
    assert!(client.is_watching());
    ticks(3).await;

    let seen = seen.lock().unwrap();
    assert!(!seen.is_empty());
    assert_eq!(seen[0].players, vec!["alice"]);
}

#[tokio::test(start_paused = true)]
async fn test_subscriber_sees_mutations_within_poll_latency() {
    let client = client();
    let room = client.create_room("alice").unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    client.on_room_update(move |room: &Room| {
        sink.lock().unwrap().push(room.players.len());
    });

    ticks(2).await;
    client.join_room(&room.code, "bob").unwrap();
    ticks(2).await;

    let seen = seen.lock().unwrap();
    assert_eq!(*seen.last().unwrap(), 2, "snapshot reflects the join");
}

#[tokio::test(start_paused = true)]
async fn test_leave_room_stops_watching() {
    let client = client();
    let room = client.create_room("alice").unwrap();

    let seen = Arc::new(Mutex::new(0usize));
    let sink = seen.clone();
    client.on_room_update(move |_| *sink.lock().unwrap() += 1);

    ticks(2).await;
    client.leave_room(&room.code, "alice").unwrap();
    assert!(!client.is_watching());
    ticks(1).await;

    let after_leave = *seen.lock().unwrap();
    ticks(5).await;
    assert_eq!(*seen.lock().unwrap(), after_leave, "no emissions after leave");
}

#[tokio::test(start_paused = true)]
async fn test_disconnect_keeps_room_alive_for_others() {
    let dir = tempfile::tempdir().unwrap();
    let host = file_client(dir.path());
    let guest = file_client(dir.path());

    let room = host.create_room("alice").unwrap();
    guest.join_room(&room.code, "bob").unwrap();

    guest.disconnect();
    assert!(!guest.is_watching());
    assert_eq!(guest.current_room().unwrap(), None);

    // alice still sees the full roster: bob detached, he did not leave.
    let seen = host.current_room().unwrap().unwrap();
    assert_eq!(seen.players, vec!["alice", "bob"]);
}

#[tokio::test(start_paused = true)]
async fn test_two_clients_converge_through_shared_backend() {
    let dir = tempfile::tempdir().unwrap();
    let host = file_client(dir.path());
    let guest = file_client(dir.path());

    let room = host.create_room("alice").unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    host.on_room_update(move |room: &Room| {
        sink.lock().unwrap().push(room.players.clone());
    });

    ticks(2).await;
    guest.join_room(&room.code, "bob").unwrap();
    ticks(2).await;

    // The host's poll loop observed the guest's write: eventual
    // convergence bounded by the interval, with no push channel.
    let seen = seen.lock().unwrap();
    assert_eq!(seen.last().unwrap(), &vec!["alice".to_owned(), "bob".to_owned()]);
}
