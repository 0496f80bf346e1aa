//! End-to-end console scenarios on the headless substrate.

use std::time::Duration;

use serde_json::Value;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::events::SurfaceEvent;
use crate::runtime::{run, Console, ConsoleEvent, Step};
use crate::shell::View;
use crate::surface::{BaseStyle, ContainerSize};

fn config(token: Option<&str>, delay_ms: u64) -> Config {
    Config {
        map_access_token: token.map(str::to_string),
        map_style: BaseStyle::default(),
        initial_view: View::Dashboard,
        map_load_delay: Duration::from_millis(delay_ms),
        container_size: ContainerSize {
            width: 1280,
            height: 720,
        },
    }
}

fn snapshot(console: &Console) -> Value {
    serde_json::to_value(console.snapshot()).unwrap()
}

fn input(console: &mut Console, line: &str) -> Step {
    console
        .handle(ConsoleEvent::Input(line.to_string()))
        .unwrap_or_else(|e| panic!("`{line}` failed: {e}"))
}

/// Mount the dashboard and process events until the map reports ready.
async fn ready_console() -> (Console, mpsc::UnboundedReceiver<ConsoleEvent>) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut console = Console::new(&config(Some("token"), 0), tx);
    console.navigate(View::Dashboard);
    while let Some(event) = rx.recv().await {
        let ready = matches!(event, ConsoleEvent::Ready { .. });
        console.handle(event).unwrap();
        if ready {
            break;
        }
    }
    (console, rx)
}

#[tokio::test]
async fn test_missing_token_keeps_console_usable() {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut console = Console::new(&config(None, 0), tx.clone());
    console.navigate(View::Dashboard);

    let map = &snapshot(&console)["screen"]["map"];
    assert_eq!(map["surface"]["state"], "unavailable");
    assert_eq!(map["placeholder"]["title"], "Map unavailable");
    assert_eq!(map["summary"]["count"], 3);

    for line in ["view projects", "search mangrove", "quit"] {
        tx.send(ConsoleEvent::Input(line.to_string())).unwrap();
    }
    let mut out = Vec::new();
    run(console, rx, &mut out).await.unwrap();

    let lines: Vec<Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["screen"]["view"], "projects");
    let rows = lines[1]["screen"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "BC-2024-002");
}

#[tokio::test]
async fn test_click_on_map_opens_modal() {
    let (mut console, _rx) = ready_console().await;
    let map = &snapshot(&console)["screen"]["map"];
    assert_eq!(map["surface"]["state"], "ready");
    assert_eq!(map["registered"].as_array().unwrap().len(), 3);

    input(&mut console, "hover BC-2024-0078");
    let snap = snapshot(&console);
    assert_eq!(snap["screen"]["map"]["popup"]["project_id"], "BC-2024-0078");
    assert_eq!(snap["substrate"]["popups"], 1);
    assert!(snap["screen"]["modal"].is_null());

    input(&mut console, "click BC-2024-0078");
    let modal = &snapshot(&console)["screen"]["modal"];
    assert_eq!(modal["id"], "BC-2024-0078");
    assert_eq!(modal["retirement_rate"], 66);

    input(&mut console, "tab activity");
    assert_eq!(snapshot(&console)["screen"]["modal"]["content"]["tab"], "activity");

    input(&mut console, "close");
    assert!(snapshot(&console)["screen"]["modal"].is_null());
}

#[tokio::test]
async fn test_style_toggle_restores_layers_after_load() {
    let (mut console, mut rx) = ready_console().await;

    input(&mut console, "toggle-style");
    let snap = snapshot(&console);
    assert_eq!(snap["substrate"]["style"], "satellite-v9");
    assert_eq!(snap["substrate"]["layers"], 0);

    let event = rx.recv().await.unwrap();
    assert!(matches!(
        event,
        ConsoleEvent::Surface(SurfaceEvent::StyleLoaded { .. })
    ));
    console.handle(event).unwrap();
    let snap = snapshot(&console);
    assert_eq!(snap["substrate"]["layers"], 6);
    assert_eq!(snap["screen"]["map"]["style"], "satellite-v9");
}

#[tokio::test]
async fn test_leaving_dashboard_tears_map_down() {
    let (mut console, mut rx) = ready_console().await;
    assert_eq!(snapshot(&console)["resize_listeners"], 1);

    input(&mut console, "view users");
    let snap = snapshot(&console);
    assert_eq!(snap["resize_listeners"], 0);
    assert_eq!(snap["substrate"]["destroyed"], true);
    assert_eq!(snap["substrate"]["listeners"], 0);
    assert!(console
        .handle(ConsoleEvent::Input("click BC-2024-0078".into()))
        .is_err());

    input(&mut console, "view dashboard");
    let event = rx.recv().await.unwrap();
    console.handle(event).unwrap();
    let snap = snapshot(&console);
    assert_eq!(snap["resize_listeners"], 1);
    assert_eq!(snap["substrate"]["listeners"], 9);
    assert_eq!(snap["screen"]["map"]["surface"]["state"], "ready");
}

#[tokio::test(start_paused = true)]
async fn test_navigating_away_cancels_pending_ready() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut console = Console::new(&config(Some("token"), 50), tx);
    console.navigate(View::Dashboard);
    input(&mut console, "view marketplace");

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_resize_and_reset_reach_substrate() {
    let (mut console, _rx) = ready_console().await;

    input(&mut console, "resize 900 500");
    assert_eq!(snapshot(&console)["substrate"]["size"]["width"], 900);

    input(&mut console, "zoom-in");
    input(&mut console, "zoom-in");
    assert_eq!(snapshot(&console)["substrate"]["camera"]["zoom"], 7.0);
    input(&mut console, "reset");
    let camera = &snapshot(&console)["substrate"]["camera"];
    assert_eq!(camera["zoom"], 5.0);
    assert_eq!(camera["center"]["lng"], 78.9629);
}

#[tokio::test]
async fn test_screen_commands_report_errors_without_stopping() {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut console = Console::new(&config(None, 0), tx.clone());
    console.navigate(View::Reporting);

    for line in ["range 2024-03-01 2024-01-01", "track BC-2024-0156", "snapshot"] {
        tx.send(ConsoleEvent::Input(line.to_string())).unwrap();
    }
    tx.send(ConsoleEvent::InputClosed).unwrap();
    let mut out = Vec::new();
    run(console, rx, &mut out).await.unwrap();

    let lines: Vec<Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0]["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid date range"));
    assert!(lines[1]["error"].is_string());
    assert_eq!(lines[2]["screen"]["view"], "reporting");
}
