//! Terminal runner for the quiz funnel: drives the scripted dialogue and
//! the reveal phases over stdin/stdout.

use std::io::Write as _;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::time::{Instant, interval_at, sleep};
use url::Url;

use quiz_funnel::attribution::Attribution;
use quiz_funnel::config::FunnelConfig;
use quiz_funnel::content;
use quiz_funnel::dialogue::DialogueEngine;
use quiz_funnel::embed::{EmbedRegistry, LogEmbedHost};
use quiz_funnel::funnel::countdown::{RevealCountdown, format_mmss};
use quiz_funnel::funnel::{BuyingNow, FunnelPhase, NoopViewport, PhaseController, SpotsCounter};
use quiz_funnel::profile::Gender;
use quiz_funnel::reveal::TypedReveal;
use quiz_funnel::script;
use quiz_funnel::store::{AnswerStore, LibSqlStorage, MemoryStorage, Storage};
use quiz_funnel::tracking::{Analytics, LogSink, TrackingInit};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let db_path =
        std::env::var("FUNNEL_DB_PATH").unwrap_or_else(|_| "./data/funnel.db".to_string());
    let mut config = FunnelConfig::default();
    if let Ok(checkout) = std::env::var("FUNNEL_CHECKOUT_URL") {
        config = config.with_checkout_url(&checkout)?;
    }
    config.validate()?;

    eprintln!("quiz-funnel v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Storage: {db_path}");
    eprintln!("   Checkout: {}\n", config.checkout_url);

    // Durable storage, degrading to memory-only when it cannot be opened.
    let storage: Arc<dyn Storage> = match LibSqlStorage::new_local(std::path::Path::new(&db_path))
        .await
    {
        Ok(storage) => Arc::new(storage),
        Err(e) => {
            tracing::warn!("Storage unavailable ({e}), continuing in-memory only");
            Arc::new(MemoryStorage::new())
        }
    };

    let tracking_init = TrackingInit::new();
    tracking_init.init();
    let analytics = Analytics::new(Arc::new(LogSink));

    // Attribution is captured once from the entry URL and replayed later.
    let entry_url = std::env::var("FUNNEL_ENTRY_URL")
        .ok()
        .and_then(|raw| Url::parse(&raw).ok());
    let attribution = Attribution::load_or_capture(&storage, entry_url.as_ref()).await;

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    // ── Landing ─────────────────────────────────────────────────────────
    analytics.page_view("landing");
    println!("WARNING: there's a proven way to get your ex back, and it starts here.");
    println!("[Enter] DISCOVER BEFORE IT'S TOO LATE");
    input.next_line().await?;

    // ── Dialogue ────────────────────────────────────────────────────────
    analytics.page_view("chat");
    let store = AnswerStore::load(storage.clone()).await;
    let mut engine = DialogueEngine::new(store.clone(), analytics.clone());

    type_out(script::GREETING, config.type_tick).await;
    println!("[Enter] {}", script::START_ACTION);
    input.next_line().await?;
    engine.begin();

    while !engine.is_complete() {
        let Some(question) = engine.current_question() else {
            break;
        };
        type_out(question.prompt, config.type_tick).await;
        sleep(config.settle_delay).await;
        engine.prompt_typed();

        let options = engine.options().await;
        for (i, (_, label)) in options.iter().enumerate() {
            println!("  [{}] {label}", i + 1);
        }
        let choice = read_index(&mut input, options.len()).await?;
        let Some(accepted) = engine.select(options[choice].0).await else {
            continue;
        };

        println!("ANALYZING DATA...");
        sleep(config.processing_delay).await;
        type_out(accepted.acknowledgement, config.type_tick).await;
        println!("ANALYSIS: {}%", (accepted.progress * 100.0).round());
        sleep(config.inter_question_pause).await;
        engine.acknowledged().await;
    }

    sleep(config.completion_pause).await;
    type_out(script::CLOSING, config.type_tick).await;
    let badge = engine.completion_badge().await;
    println!("\n=== {} ===", badge.title);
    println!("{}\n", badge.subtitle);
    println!("[Enter] {}", script::COMPLETION_ACTION);
    input.next_line().await?;
    engine.record_cta_click();

    // ── Reveal funnel ───────────────────────────────────────────────────
    analytics.page_view("result");
    let profile = store.profile().await;
    let gender = profile.gender.unwrap_or(Gender::Male);

    let countdown =
        RevealCountdown::load_or_start(&storage, config.session_window, Utc::now()).await;
    println!(
        "\nYour Personalized Plan Is Ready. Your analysis expires in: {}",
        format_mmss(countdown.remaining(Utc::now()))
    );

    let embeds = EmbedRegistry::new(Arc::new(LogEmbedHost));
    let mut controller = PhaseController::new(
        config.clone(),
        analytics.clone(),
        embeds,
        Arc::new(NoopViewport),
    );

    println!("\nANALYZING YOUR CASE");
    println!("  Responses processed");
    println!("  {}", content::diagnosis::loading_message(gender));
    let loading_bar = async {
        let mut pct: u8 = 0;
        let tick = config.loading_progress_tick;
        let mut ticker = interval_at(Instant::now() + tick, tick);
        while pct < 100 {
            ticker.tick().await;
            pct = pct.saturating_add(config.loading_progress_step).min(100);
            print!("\r  {pct}%");
            std::io::stdout().flush().ok();
        }
        println!();
    };
    tokio::join!(controller.run_loading(), loading_bar);

    println!("\n{}", step_strip(controller.phase()));
    println!("\n=== {} ===", content::diagnosis::title(gender));
    for (label, value) in content::summary_rows(&profile) {
        println!("  {label}: {value}");
    }
    println!("\n{}\n", content::diagnosis::narrative(&profile));
    println!("{}", content::diagnosis::emotional_validation(&profile));
    if let Some(contact) = profile.contact_status {
        println!("{}", content::diagnosis::situation_insight(contact, gender));
    }
    println!("\n[Enter] Unlock The Secret Video");
    input.next_line().await?;
    controller.confirm_diagnosis().await;

    println!("\n{}", step_strip(controller.phase()));
    println!("\nNow there's just one more step to win back the one you love.");
    println!(
        "Next section unlocks in {} seconds...",
        controller.video_gate_remaining()
    );
    controller.run_video_gate().await;
    println!("[Enter] Reveal 72-HOUR WINDOW");
    input.next_line().await?;
    controller.confirm_video().await;

    println!("\n{}", step_strip(controller.phase()));
    println!("\n=== {} ===", content::window::TITLE);
    println!("{}\n", content::window::narrative(gender));
    for phase in content::window::WindowPhase::ALL {
        println!("{}", phase.heading());
        println!("{}\n", content::window::phase_text(gender, phase));
    }
    println!("[Enter] Reveal My Personalized Plan");
    input.next_line().await?;
    controller.confirm_window().await;

    // ── Offer (terminal) ────────────────────────────────────────────────
    let spots = SpotsCounter::load_or_start(
        storage.clone(),
        analytics.clone(),
        config.spots_initial,
        config.spots_floor,
    )
    .await;
    let spots = Arc::new(tokio::sync::Mutex::new(spots));
    {
        // Fixed-interval decrement runs for the rest of the session.
        let spots = spots.clone();
        let every = config.spots_interval;
        tokio::spawn(async move {
            loop {
                sleep(every).await;
                if spots.lock().await.tick().await.is_none() {
                    break;
                }
            }
        });
    }
    let mut buying = {
        let mut rng = rand::thread_rng();
        BuyingNow::seeded(&mut rng, config.buying_min, config.buying_max)
    };

    println!("\n{}", step_strip(controller.phase()));
    println!("\n=== {} ===", content::offer::title(gender));
    for item in content::offer::value_stack(gender) {
        println!("  {}: {}", item.label, item.price);
    }
    println!("  TOTAL VALUE: {}", content::offer::TOTAL_VALUE);
    for feature in content::offer::features(gender) {
        println!("  * {feature}");
    }
    println!(
        "\n  Regular price: {} / today only {}",
        content::offer::LIST_PRICE,
        content::offer::TODAY_PRICE
    );
    println!("  {}", content::offer::DISCOUNT_LABEL);

    loop {
        println!(
            "\n  {} ({} remaining, {}/{} spots, {} buying now)",
            content::offer::cta(gender),
            format_mmss(countdown.remaining(Utc::now())),
            spots.lock().await.value(),
            config.spots_initial,
            buying.value(),
        );
        println!("  [b]uy  [w]ait  [q]uit");
        match input.next_line().await?.as_deref().map(str::trim) {
            Some("b") => {
                if let Some(url) = controller.record_cta_click(&attribution) {
                    println!("\nOpening checkout: {url}");
                }
                break;
            }
            Some("w") => {
                // Let the scarcity theater advance while the user hesitates.
                let wait = {
                    let mut rng = rand::thread_rng();
                    buying.tick(&mut rng);
                    BuyingNow::next_interval(
                        &mut rng,
                        config.buying_interval_min,
                        config.buying_interval_max,
                    )
                };
                sleep(wait).await;
            }
            Some("q") | None => break,
            _ => {}
        }
    }

    tracking_init.teardown();
    Ok(())
}

/// Render the step progress strip with the current phase highlighted.
fn step_strip(current: FunnelPhase) -> String {
    [
        FunnelPhase::Diagnosis,
        FunnelPhase::Video,
        FunnelPhase::Window,
        FunnelPhase::Offer,
    ]
    .iter()
    .map(|phase| {
        if *phase == current {
            format!("[{}]", phase.step_label())
        } else {
            phase.step_label().to_string()
        }
    })
    .collect::<Vec<_>>()
    .join(" > ")
}

/// Type a bot message to stdout one character per tick.
async fn type_out(text: &str, tick: Duration) {
    let mut reveal = TypedReveal::new(text, tick);
    let mut printed = 0;
    while let Some(prefix) = reveal.advance().await {
        let fragment = &prefix[printed..];
        print!("{fragment}");
        std::io::stdout().flush().ok();
        printed = prefix.len();
    }
    println!();
}

/// Read a 1-based option index from stdin, retrying until it is valid.
async fn read_index(input: &mut Lines<BufReader<Stdin>>, len: usize) -> anyhow::Result<usize> {
    loop {
        let Some(line) = input.next_line().await? else {
            anyhow::bail!("stdin closed");
        };
        match line.trim().parse::<usize>() {
            Ok(n) if (1..=len).contains(&n) => return Ok(n - 1),
            _ => println!("  Pick an option between 1 and {len}."),
        }
    }
}
