//! Messy "online channel" datasets: web analytics, support tickets,
//! chat transcripts and social posts, written under `online_data/raw/`.
//! These are raw feeds for downstream cleaning pipelines, so every
//! file carries deliberate defects at fixed rates: missing and
//! malformed ids, impossible counters, casing drift, schema drift,
//! future timestamps and the occasional line that is not JSON at all.
//!
//! EXECUTION ORDER: analytics, tickets, chats, posts. All four files
//! share one stream; reordering the files or the draws inside a row
//! changes every seeded output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::catalog::Catalog;
use crate::config::GeneratorConfig;
use crate::error::GenResult;
use crate::rng::{RngBank, StreamRng, StreamSlot};
use crate::types::round_cents;

pub const WEB_ANALYTICS_ROWS: usize = 5_000;
pub const SUPPORT_TICKET_ROWS: usize = 2_000;
pub const SUPPORT_CHAT_ROWS: usize = 1_500;
pub const SOCIAL_POST_ROWS: usize = 3_000;

const PAGES: &[Option<&str>] = &[
    Some("/home"),
    Some("/products"),
    Some("/checkout"),
    Some("/cart"),
    Some("/login"),
    Some("/signup"),
    Some("/product/shoes"),
    Some("/product/shirts"),
    Some("/category/electronics"),
    Some("/search"),
    Some("/about"),
    Some("/contact"),
    None,
    Some(""),
];

const UTM_SOURCES: &[Option<&str>] = &[
    Some("google"),
    Some("facebook"),
    Some("email"),
    Some("direct"),
    Some("instagram"),
    Some("twitter"),
    Some("linkedin"),
    None,
    Some("unknown"),
    Some("organic"),
];

// Casing drift is deliberate.
const DEVICES: &[Option<&str>] = &[
    Some("desktop"),
    Some("mobile"),
    Some("tablet"),
    None,
    Some("Desktop"),
    Some("Mobile"),
    Some("TABLET"),
];

const TICKET_STATUSES: &[Option<&str>] = &[
    Some("open"),
    Some("closed"),
    Some("pending"),
    Some("resolved"),
    Some("Open"),
    Some("CLOSED"),
    None,
    Some("in_progress"),
];

const TICKET_PRIORITIES: &[Option<&str>] = &[
    Some("low"),
    Some("medium"),
    Some("high"),
    Some("urgent"),
    Some("Low"),
    Some("HIGH"),
    None,
    Some("critical"),
];

const TICKET_CATEGORIES: &[Option<&str>] = &[
    Some("billing"),
    Some("technical"),
    Some("product"),
    Some("shipping"),
    Some("return"),
    Some("complaint"),
    None,
    Some("other"),
];

const PLATFORMS: &[Option<&str>] = &[
    Some("facebook"),
    Some("twitter"),
    Some("instagram"),
    Some("linkedin"),
    Some("tiktok"),
    Some("Facebook"),
    Some("TWITTER"),
    None,
];

const POST_TYPES: &[Option<&str>] = &[
    Some("image"),
    Some("video"),
    Some("text"),
    Some("carousel"),
    Some("story"),
    Some("reel"),
    None,
    Some("link"),
];

const SENTIMENTS: &[Option<&str>] = &[
    Some("positive"),
    Some("negative"),
    Some("neutral"),
    Some("Positive"),
    Some("NEGATIVE"),
    None,
    Some("mixed"),
    Some("unknown"),
];

const COUNTRY_CODES: &[&str] = &["US", "GB", "DE", "FR", "CA", "AU", "BR", "JP", "IN", "MX"];

pub fn raw_dir(out_dir: &Path) -> PathBuf {
    out_dir.join("online_data").join("raw")
}

pub struct OnlineDataGenerator {
    config: GeneratorConfig,
    bank: RngBank,
}

impl OnlineDataGenerator {
    pub fn new(config: GeneratorConfig, seed: u64) -> Self {
        Self {
            config,
            bank: RngBank::new(seed),
        }
    }

    /// Write all four raw files. Reruns with the same seed produce
    /// byte-identical output; there is no skip marker here, existing
    /// files are simply rewritten.
    pub fn generate_all(&self, out_dir: &Path) -> GenResult<()> {
        let raw = raw_dir(out_dir);
        std::fs::create_dir_all(&raw)?;

        let mut rng = self.bank.for_stream(StreamSlot::Online);
        let analytics = self.write_web_analytics(&raw.join("web_analytics.csv"), &mut rng)?;
        let tickets = self.write_support_tickets(&raw.join("support_tickets.jsonl"), &mut rng)?;
        let chats = self.write_support_chats(&raw.join("support_chats.jsonl"), &mut rng)?;
        let posts = self.write_social_posts(&raw.join("social_posts.csv"), &mut rng)?;

        log::info!(
            "online data: {analytics} analytics rows, {tickets} tickets, {chats} chats, {posts} posts under {}",
            raw.display()
        );
        Ok(())
    }

    fn write_web_analytics(&self, path: &Path, rng: &mut StreamRng) -> GenResult<usize> {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(
            writer,
            "timestamp,user_id,session_id,page_url,page_views,bounce_rate,\
             session_duration_seconds,utm_source,device_type,conversion_event,\
             revenue,browser_version,country,city"
        )?;
        for _ in 0..WEB_ANALYTICS_ROWS {
            let row = web_analytics_row(self.config.reference_date, rng);
            writeln!(writer, "{}", render_csv_row(&row))?;
        }
        writer.flush()?;
        Ok(WEB_ANALYTICS_ROWS)
    }

    fn write_support_tickets(&self, path: &Path, rng: &mut StreamRng) -> GenResult<usize> {
        let mut writer = BufWriter::new(File::create(path)?);
        for _ in 0..SUPPORT_TICKET_ROWS {
            let ticket = ticket_record(self.config.reference_date, rng);
            if rng.chance(0.005) {
                writeln!(writer, "{}", python_repr_line(&ticket))?;
            } else {
                writeln!(writer, "{}", serde_json::to_string(&ticket)?)?;
            }
        }
        writer.flush()?;
        Ok(SUPPORT_TICKET_ROWS)
    }

    fn write_support_chats(&self, path: &Path, rng: &mut StreamRng) -> GenResult<usize> {
        let mut writer = BufWriter::new(File::create(path)?);
        for _ in 0..SUPPORT_CHAT_ROWS {
            let chat = chat_record(self.config.reference_date, rng);
            writeln!(writer, "{}", serde_json::to_string(&chat)?)?;
        }
        writer.flush()?;
        Ok(SUPPORT_CHAT_ROWS)
    }

    fn write_social_posts(&self, path: &Path, rng: &mut StreamRng) -> GenResult<usize> {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(
            writer,
            "post_id,user_id,platform,posted_at,post_type,post_content,hashtags,\
             likes,shares,comments,reach,impressions,sentiment,location,\
             audience_age_range,engagement_rate"
        )?;
        for _ in 0..SOCIAL_POST_ROWS {
            let row = social_post_row(self.config.reference_date, rng);
            writeln!(writer, "{}", render_csv_row(&row))?;
        }
        writer.flush()?;
        Ok(SOCIAL_POST_ROWS)
    }
}

// ── Web analytics ──────────────────────────────────────────────────

fn web_analytics_row(reference: NaiveDate, rng: &mut StreamRng) -> Vec<String> {
    let timestamp = if rng.chance(0.02) {
        stamp_forward(rng, reference, 30)
    } else {
        stamp_back(rng, reference, 90)
    };

    let user_id = if rng.chance(0.05) {
        None
    } else if rng.chance(0.03) {
        Some(format!("user_{}_malformed_", randint(rng, 1, 99_999)))
    } else {
        Some(format!("user_{}", randint(rng, 10_000, 99_999)))
    };

    let session_id = if rng.chance(0.02) {
        None
    } else if rng.chance(0.01) {
        // A shared id, so sessions collide across rows.
        Some(format!("sess_duplicate_{}", randint(rng, 1, 10)))
    } else {
        Some(format!("sess_{}", hex_id(rng, 12)))
    };

    let page_views = if rng.chance(0.01) {
        let spike = randint(rng, 1_000, 9_999);
        *rng.pick(&[-1, 0, spike])
    } else {
        randint(rng, 1, 50)
    };

    let bounce_rate = if rng.chance(0.02) {
        *rng.pick(&[Some(-0.1), Some(1.5), Some(999.0), None])
    } else {
        Some((rng.uniform(0.1, 0.9) * 1_000.0).round() / 1_000.0)
    };

    let session_duration = if rng.chance(0.03) {
        *rng.pick(&[None, Some(-30), Some(99_999)])
    } else {
        Some(randint(rng, 10, 3_600))
    };

    let conversion_event: Option<&str> = if rng.chance(0.10) {
        if rng.chance(0.02) {
            Some(*rng.pick(&["PURCHASE_ERROR", "", "null", "undefined"]))
        } else {
            Some(*rng.pick(&["purchase", "signup", "download", "subscribe"]))
        }
    } else {
        None
    };

    let revenue = if conversion_event == Some("purchase") && rng.chance(0.9) {
        if rng.chance(0.01) {
            Some(*rng.pick(&[-10.50, 0.0, 999_999.99]))
        } else {
            Some(round_cents(rng.uniform(10.0, 500.0)))
        }
    } else if rng.chance(0.005) {
        // Revenue with no conversion event attached.
        Some(round_cents(rng.uniform(1.0, 100.0)))
    } else {
        None
    };

    let browser_version = if rng.chance(0.10) {
        Some(*rng.pick(&["Chrome 91", "Firefox 89", "Safari 14"]))
    } else {
        None
    };
    let (country, city) = if rng.chance(0.05) {
        (Some(*rng.pick(COUNTRY_CODES)), Some(Catalog::city(rng)))
    } else {
        (None, None)
    };

    vec![
        fmt_stamp(timestamp),
        cell(user_id),
        cell(session_id),
        cell(*rng.pick(PAGES)),
        page_views.to_string(),
        cell(bounce_rate),
        cell(session_duration),
        cell(*rng.pick(UTM_SOURCES)),
        cell(*rng.pick(DEVICES)),
        cell(conversion_event),
        cell(revenue),
        cell(browser_version),
        cell(country),
        cell(city),
    ]
}

// ── Support tickets ────────────────────────────────────────────────

#[derive(Serialize)]
struct TicketRecord {
    ticket_id: String,
    customer_id: Option<String>,
    created_at: String,
    status: Option<&'static str>,
    priority: Option<&'static str>,
    category: Option<&'static str>,
    subject: Option<String>,
    description: Option<String>,
    resolution_time_hours: Option<i64>,
    agent_id: Option<String>,
}

fn ticket_record(reference: NaiveDate, rng: &mut StreamRng) -> TicketRecord {
    let created_at = if rng.chance(0.01) {
        stamp_forward(rng, reference, 7)
    } else {
        stamp_back(rng, reference, 180)
    };

    let customer_id = if rng.chance(0.08) {
        None
    } else if rng.chance(0.05) {
        let styled = [
            format!("CUST{}", randint(rng, 1_000, 9_999)),
            format!("customer_{}", randint(rng, 100, 999)),
            randint(rng, 10_000, 99_999).to_string(),
        ];
        Some(styled[rng.next_u64_below(3) as usize].clone())
    } else {
        Some(format!("user_{}", randint(rng, 10_000, 99_999)))
    };

    let ticket_id = if rng.chance(0.005) {
        format!("TICKET_DUPLICATE_{}", randint(rng, 1, 5))
    } else {
        format!("TICKET_{}", hex_id(rng, 8).to_uppercase())
    };

    let subject = ticket_subject(rng);

    let description = if rng.chance(0.05) {
        None
    } else if rng.chance(0.03) {
        Some((*rng.pick(&["help", "??", "urgent"])).to_string())
    } else if rng.chance(0.02) {
        Some(prose(rng, 2_000))
    } else {
        Some(prose(rng, 500))
    };

    // The probe is a fresh status draw, not the stored one, so
    // resolution times land on open tickets too.
    let probe = *rng.pick(TICKET_STATUSES);
    let resolution_time_hours = if matches!(probe, Some("closed" | "resolved" | "CLOSED")) {
        if rng.chance(0.9) {
            Some(randint(rng, 1, 168))
        } else {
            None
        }
    } else if rng.chance(0.02) {
        Some(randint(rng, 1, 48))
    } else {
        None
    };

    TicketRecord {
        ticket_id,
        customer_id,
        created_at: fmt_stamp(created_at),
        status: *rng.pick(TICKET_STATUSES),
        priority: *rng.pick(TICKET_PRIORITIES),
        category: *rng.pick(TICKET_CATEGORIES),
        subject,
        description,
        resolution_time_hours,
        agent_id: if rng.chance(0.8) {
            Some(format!("agent_{}", randint(rng, 1, 50)))
        } else {
            None
        },
    }
}

fn ticket_subject(rng: &mut StreamRng) -> Option<String> {
    match rng.next_u64_below(11) {
        0 => Some("Can't login to my account".to_string()),
        1 => Some("Order not received".to_string()),
        2 => Some("Wrong item shipped".to_string()),
        3 => Some("Billing issue".to_string()),
        4 => Some("Website is down".to_string()),
        5 => Some("Product defective".to_string()),
        6 => None,
        7 => Some(String::new()),
        8 => Some("a".repeat(200)),
        9 => Some("LOGIN PROBLEM!!!!!!".to_string()),
        _ => Some("help me plz".to_string()),
    }
}

/// A fraction of tickets are written with Python-style bare `None`s
/// in place of JSON nulls, so those lines fail any strict JSON parser.
/// Kept as a defect class.
fn python_repr_line(ticket: &TicketRecord) -> String {
    let pairs = [
        ("ticket_id", repr_str(Some(ticket.ticket_id.as_str()))),
        ("customer_id", repr_str(ticket.customer_id.as_deref())),
        ("created_at", repr_str(Some(ticket.created_at.as_str()))),
        ("status", repr_str(ticket.status)),
        ("priority", repr_str(ticket.priority)),
        ("category", repr_str(ticket.category)),
        ("subject", repr_str(ticket.subject.as_deref())),
        ("description", repr_str(ticket.description.as_deref())),
        ("resolution_time_hours", repr_int(ticket.resolution_time_hours)),
        ("agent_id", repr_str(ticket.agent_id.as_deref())),
    ];
    let body = pairs
        .iter()
        .map(|(key, value)| format!("\"{key}\": {value}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{body}}}")
}

fn repr_str(value: Option<&str>) -> String {
    match value {
        Some(s) => serde_json::Value::from(s).to_string(),
        None => "None".to_string(),
    }
}

fn repr_int(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "None".to_string())
}

// ── Chat transcripts ───────────────────────────────────────────────

#[derive(Serialize)]
struct ChatMessage {
    sender: &'static str,
    message: String,
    timestamp: String,
}

#[derive(Serialize)]
struct ChatRecord {
    chat_id: String,
    customer_id: Option<String>,
    chat_start: String,
    duration_minutes: Option<i64>,
    messages: Vec<ChatMessage>,
    satisfaction_score: Option<i64>,
}

fn chat_record(reference: NaiveDate, rng: &mut StreamRng) -> ChatRecord {
    let chat_id = format!("chat_{}", hex_id(rng, 10));
    let customer_id = if rng.chance(0.9) {
        Some(format!("user_{}", randint(rng, 10_000, 99_999)))
    } else {
        None
    };
    let chat_start = stamp_back(rng, reference, 90);

    let count = randint(rng, 2, 20);
    let mut messages = Vec::with_capacity(count as usize);
    for idx in 0..count {
        let sender = *rng.pick(&["customer", "agent"]);
        let message = if rng.chance(0.02) {
            String::new()
        } else if rng.chance(0.01) {
            prose(rng, 1_000)
        } else {
            Catalog::sentence(rng, 3, 20)
        };
        let timestamp = chat_start + Duration::minutes(idx * randint(rng, 1, 5));
        messages.push(ChatMessage {
            sender,
            message,
            timestamp: fmt_stamp(timestamp),
        });
    }

    let duration_minutes = if rng.chance(0.8) {
        Some(randint(rng, 5, 60))
    } else {
        None
    };

    ChatRecord {
        chat_id,
        customer_id,
        chat_start: fmt_stamp(chat_start),
        duration_minutes,
        messages,
        satisfaction_score: if rng.chance(0.6) {
            Some(randint(rng, 1, 5))
        } else {
            None
        },
    }
}

// ── Social posts ───────────────────────────────────────────────────

fn social_post_row(reference: NaiveDate, rng: &mut StreamRng) -> Vec<String> {
    let post_id = if rng.chance(0.02) {
        format!("post_malformed_{}_", randint(rng, 1, 100))
    } else {
        format!("post_{}", hex_id(rng, 12))
    };

    let user_id = if rng.chance(0.06) {
        None
    } else if rng.chance(0.04) {
        let styled = [
            format!("@user{}", randint(rng, 100, 999)),
            format!("user_{}", randint(rng, 10_000, 99_999)),
            format!("USER{}", randint(rng, 1_000, 9_999)),
        ];
        Some(styled[rng.next_u64_below(3) as usize].clone())
    } else {
        Some(format!("user_{}", randint(rng, 10_000, 99_999)))
    };

    let posted_at = if rng.chance(0.015) {
        stamp_forward(rng, reference, 14)
    } else {
        stamp_back(rng, reference, 60)
    };

    let likes: Option<i64> = if rng.chance(0.02) {
        *rng.pick(&[Some(-5), None, Some(999_999)])
    } else {
        Some(randint(rng, 0, 10_000))
    };

    let shares: Option<i64> = if rng.chance(0.03) {
        *rng.pick(&[None, Some(-1), Some(50_000)])
    } else {
        match likes {
            Some(l) if l > 0 => Some(randint(rng, 0, l / 10 + 1)),
            _ => Some(0),
        }
    };

    let comments: Option<i64> = if rng.chance(0.01) {
        // Viral shape: comments dwarf likes.
        match likes {
            Some(l) if l > 0 => Some(randint(rng, l * 2, l * 5)),
            _ => Some(randint(rng, 1_000, 5_000)),
        }
    } else if rng.chance(0.02) {
        None
    } else {
        match likes {
            Some(l) if l > 0 => Some(randint(rng, 0, l / 5 + 1)),
            _ => Some(0),
        }
    };

    let reach: Option<i64> = if rng.chance(0.08) {
        None
    } else if rng.chance(0.02) {
        // Reach below engagement, which no platform would report.
        Some(randint(rng, 1, (likes.unwrap_or(0) / 2).max(1)))
    } else {
        let total = likes.unwrap_or(0) + shares.unwrap_or(0) + comments.unwrap_or(0);
        Some(randint(rng, total, total * 10 + 100))
    };

    let impressions: Option<i64> = if rng.chance(0.1) {
        None
    } else if rng.chance(0.02) && reach.is_some_and(|r| r != 0) {
        let r = reach.unwrap_or(1);
        if r / 2 < 1 {
            Some(randint(rng, r / 2, 1))
        } else {
            Some(randint(rng, 1, r / 2))
        }
    } else {
        Some(randint(rng, 100, 10_000))
    };

    let post_content = if rng.chance(0.03) {
        None
    } else if rng.chance(0.02) {
        Some(prose(rng, 2_000))
    } else if rng.chance(0.01) {
        Some("🎉🔥💯✨🚀".to_string())
    } else {
        Some(prose(rng, 280))
    };

    let mut hashtags: Vec<String> = Vec::new();
    if rng.chance(0.7) {
        for _ in 0..randint(rng, 1, 8) {
            if rng.chance(0.05) {
                hashtags.push((*rng.pick(&["#", "##retail", "#malformed#", "nothashtag"])).to_string());
            } else {
                hashtags.push(format!("#{}", Catalog::word(rng)));
            }
        }
    }

    let location = if rng.chance(0.08) {
        Some(Catalog::city(rng))
    } else {
        None
    };
    let audience_age_range = if rng.chance(0.05) {
        Some(*rng.pick(&["18-24", "25-34", "35-44", "45-54", "55+"]))
    } else {
        None
    };
    let mut engagement_rate = None;
    if rng.chance(0.03) {
        if let (Some(l), Some(imp)) = (likes, impressions) {
            if l != 0 && imp > 0 {
                let rate = (l + comments.unwrap_or(0) + shares.unwrap_or(0)) as f64 / imp as f64;
                engagement_rate = Some((rate * 10_000.0).round() / 10_000.0);
            }
        }
    }

    vec![
        post_id,
        cell(user_id),
        cell(*rng.pick(PLATFORMS)),
        fmt_stamp(posted_at),
        cell(*rng.pick(POST_TYPES)),
        cell(post_content),
        python_list_repr(&hashtags),
        cell(likes),
        cell(shares),
        cell(comments),
        cell(reach),
        cell(impressions),
        cell(*rng.pick(SENTIMENTS)),
        cell(location),
        cell(audience_age_range),
        cell(engagement_rate),
    ]
}

// ── Shared helpers ─────────────────────────────────────────────────

/// Inclusive on both ends, like the upstream feeds drew their counts.
fn randint(rng: &mut StreamRng, lo: i64, hi: i64) -> i64 {
    debug_assert!(lo <= hi);
    lo + rng.next_u64_below((hi - lo + 1) as u64) as i64
}

/// `chars` lowercase hex digits drawn from the stream.
fn hex_id(rng: &mut StreamRng, chars: usize) -> String {
    let mut out = String::with_capacity(chars + 16);
    while out.len() < chars {
        out.push_str(&format!("{:016x}", rng.next_u64()));
    }
    out.truncate(chars);
    out
}

/// Whole days behind the anchor with a random time of day, so the
/// result is strictly before the anchor's midnight.
fn stamp_back(rng: &mut StreamRng, reference: NaiveDate, max_days: u64) -> NaiveDateTime {
    let date = reference - Duration::days(1 + rng.next_u64_below(max_days) as i64);
    at_random_time(rng, date)
}

/// Whole days past the anchor, the future-timestamp defect.
fn stamp_forward(rng: &mut StreamRng, reference: NaiveDate, max_days: u64) -> NaiveDateTime {
    let date = reference + Duration::days(1 + rng.next_u64_below(max_days) as i64);
    at_random_time(rng, date)
}

fn at_random_time(rng: &mut StreamRng, date: NaiveDate) -> NaiveDateTime {
    let hour = rng.next_u64_below(24) as u32;
    let minute = rng.next_u64_below(60) as u32;
    let second = rng.next_u64_below(60) as u32;
    date.and_hms_opt(hour, minute, second).unwrap_or_default()
}

fn fmt_stamp(stamp: NaiveDateTime) -> String {
    stamp.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn prose(rng: &mut StreamRng, max_chars: usize) -> String {
    let mut text = Catalog::sentence(rng, 4, 12);
    loop {
        let next = Catalog::sentence(rng, 4, 12);
        if text.len() + next.len() + 1 > max_chars {
            break;
        }
        text.push(' ');
        text.push_str(&next);
    }
    text
}

fn cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Hashtag lists render the way a dataframe dump rendered them, as a
/// bracketed single-quoted list in one CSV cell.
fn python_list_repr(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| format!("'{item}'")).collect();
    format!("[{}]", quoted.join(", "))
}

fn render_csv_row(cells: &[String]) -> String {
    cells.iter().map(|c| csv_escape(c)).collect::<Vec<_>>().join(",")
}

/// RFC 4180: quote a field when it holds a comma, quote or line
/// break; double any embedded quotes.
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
