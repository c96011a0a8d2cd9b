// ==========================================
// 连铸方坯质量记录系统 - 命令行入口
// ==========================================
// 技术栈: clap + Rust + SQLite
// 所有子命令需通过 --password 访问口令门禁
// ==========================================

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Args, CommandFactory, FromArgMatches, Parser, Subcommand, ValueEnum};

use heat_qc_recorder::api::{ApiError, RecorderApi, Session};
use heat_qc_recorder::app::{get_default_db_path, AppState};
use heat_qc_recorder::domain::types::suggestions;
use heat_qc_recorder::domain::{HeatMeta, StrandPosition, StrandRecord, STRANDS_PER_HEAT};
use heat_qc_recorder::export::default_file_name;
use heat_qc_recorder::i18n::{self, t, t_with_args};
use heat_qc_recorder::repository::{RecordFilter, RecordOrder};
use heat_qc_recorder::{logging, VERSION};

#[derive(Parser)]
#[command(name = "heat-qc-recorder", version)]
#[command(about = "Billet heat quality recorder (roundness check, alerts, Excel export)")]
struct Cli {
    /// 数据库文件路径（默认: $HEAT_QC_DB_PATH 或用户数据目录）
    #[arg(long, global = true)]
    db: Option<String>,

    /// 访问口令
    #[arg(long, global = true)]
    password: Option<String>,

    /// 界面语言 (zh-CN / en)
    #[arg(long, global = true, default_value = "zh-CN")]
    lang: String,

    /// 以 JSON 格式输出日志
    #[arg(long, global = true)]
    json_log: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 录入一炉测量值
    Save(SaveArgs),
    /// 浏览全部记录
    List {
        #[arg(long, value_enum, default_value_t = OrderArg::IdDesc)]
        order: OrderArg,
        /// 只看最近 N 条（按主键倒序，忽略 --order）
        #[arg(long)]
        last: Option<usize>,
        /// 以 JSON 输出
        #[arg(long)]
        json: bool,
    },
    /// 按炉号/存放位置/操作工检索（子串、不区分大小写）
    Search {
        #[arg(long)]
        heat: Option<String>,
        #[arg(long)]
        storage: Option<String>,
        #[arg(long)]
        operator: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// 连续判废告警
    Alerts,
    /// 统计汇总（按操作工平均椭圆度、合格率）
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// 导出全部记录（.xlsx / .csv）
    Export {
        /// 输出文件，默认 QC_Report_<YYYYMMDD>.xlsx
        path: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OrderArg::TimestampDesc)]
        order: OrderArg,
    },
    /// 由历史记录生成标签字段与二维码内容
    Label { id: i64 },
    /// 配置管理
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
struct SaveArgs {
    /// 炉号
    #[arg(long, default_value = "")]
    heat: String,
    /// 操作工
    #[arg(long, default_value = "")]
    operator: String,
    /// 质检员
    #[arg(long, default_value = "")]
    inspector: String,
    /// 班次 (A/B/C/D)
    #[arg(long, default_value = "A")]
    shift: String,
    /// 连铸机号
    #[arg(long, default_value = "CCM01")]
    ccm: String,
    /// 钢种
    #[arg(long, default_value = "B500")]
    grade: String,
    /// 存放位置（默认取配置）
    #[arg(long)]
    storage: Option<String>,
    /// 支数（默认取配置）
    #[arg(long)]
    billets: Option<i64>,
    /// 短尺长度
    #[arg(long)]
    short_length: Option<f64>,
    /// 本批判废阈值 (mm)，默认取配置
    #[arg(long)]
    threshold: Option<f64>,
    /// 各流 D1，逗号分隔，按 S01..S05 顺序；0 表示未测量
    #[arg(long, value_delimiter = ',', required = true)]
    d1: Vec<f64>,
    /// 各流 D2，逗号分隔
    #[arg(long, value_delimiter = ',', required = true)]
    d2: Vec<f64>,
    /// 取样备注，格式 <流号>=<备注>，可重复
    #[arg(long)]
    sample: Vec<String>,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// 列出全部配置
    List,
    /// 读取配置
    Get { key: String },
    /// 写入配置
    Set { key: String, value: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    IdAsc,
    IdDesc,
    TimestampDesc,
}

impl From<OrderArg> for RecordOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::IdAsc => RecordOrder::IdAsc,
            OrderArg::IdDesc => RecordOrder::IdDesc,
            OrderArg::TimestampDesc => RecordOrder::TimestampDesc,
        }
    }
}

/// 在 save 子命令的帮助中列出常用钢种/班次/铸机号
fn build_cli() -> clap::Command {
    Cli::command().mut_subcommand("save", |save| {
        save.mut_arg("grade", |a| {
            a.help(format!("钢种（常用: {}）", suggestions::GRADES.join(", ")))
        })
        .mut_arg("shift", |a| {
            a.help(format!("班次（常用: {}）", suggestions::SHIFTS.join(", ")))
        })
        .mut_arg("ccm", |a| {
            a.help(format!("连铸机号（常用: {}）", suggestions::MACHINES.join(", ")))
        })
    })
}

fn main() -> Result<()> {
    let cli = Cli::from_arg_matches(&build_cli().get_matches()).unwrap_or_else(|e| e.exit());

    if cli.json_log {
        logging::init_json();
    } else {
        logging::init();
    }
    i18n::set_locale(&cli.lang);

    tracing::debug!("{} v{}", heat_qc_recorder::APP_NAME, VERSION);

    let db_path = cli.db.clone().unwrap_or_else(get_default_db_path);
    let state = AppState::new(db_path).map_err(anyhow::Error::msg)?;
    let api = state.recorder_api.clone();

    // 访问门禁
    let mut session = Session::new();
    let password = cli.password.as_deref().unwrap_or("");
    match api.login(&mut session, password) {
        Ok(()) => {}
        Err(ApiError::InvalidCredentials) => bail!(t("auth.login_failed")),
        Err(e) => return Err(e.into()),
    }

    match cli.command {
        Command::Save(args) => run_save(&api, &session, &state, args)?,
        Command::List { order, last, json } => {
            let records = match last {
                Some(n) => api.recent_records(&session, n)?,
                None => api.list_records(&session, order.into())?,
            };
            print_records(&records, json)?;
        }
        Command::Search {
            heat,
            storage,
            operator,
            json,
        } => {
            let filter = RecordFilter {
                heat_contains: heat,
                storage_contains: storage,
                operator_contains: operator,
            };
            let records = api.search_records(&session, &filter)?;
            print_records(&records, json)?;
        }
        Command::Alerts => {
            let alerts = api.check_alerts(&session)?;
            if alerts.is_empty() {
                println!("{}", t("alerts.none"));
            }
            for alert in alerts {
                println!("{}", t_with_args("alerts.strand", &[("strand", &alert.strand)]));
            }
        }
        Command::Stats { json } => {
            let summary = api.status_summary(&session)?;
            let means = api.operator_statistics(&session)?;
            if json {
                let value = serde_json::json!({ "summary": summary, "operators": means });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!(
                    "total={} pass={} reject={} reject_rate={:.1}%",
                    summary.total,
                    summary.pass,
                    summary.reject,
                    summary.reject_rate * 100.0
                );
                for m in means {
                    println!("{:<16} mean_rh={:>6.2} n={}", m.operator, m.mean_rh, m.count);
                }
            }
        }
        Command::Export { path, order } => {
            let path = path.unwrap_or_else(|| {
                PathBuf::from(default_file_name(Local::now().date_naive(), "xlsx"))
            });
            let count = api.export_records(&session, &path, order.into())?;
            let count_text = count.to_string();
            let path_text = path.display().to_string();
            println!(
                "{}",
                t_with_args("export.done", &[("count", &count_text), ("path", &path_text)])
            );
        }
        Command::Label { id } => {
            let label = api.label_for_record(&session, id)?;
            for line in label.text_lines() {
                println!("{}", line);
            }
            println!("QR: {}", label.qr_payload());
        }
        Command::Config { action } => match action {
            ConfigAction::List => {
                let configs = state
                    .config_manager
                    .list_configs()
                    .map_err(|e| anyhow::anyhow!(e.to_string()))?;
                for (key, value) in configs {
                    println!("{} = {}", key, value);
                }
            }
            ConfigAction::Get { key } => {
                let value = state
                    .config_manager
                    .get_config_value(&key)
                    .map_err(|e| anyhow::anyhow!(e.to_string()))?;
                match value {
                    Some(v) => println!("{}", v),
                    None => bail!(t_with_args("config.not_found", &[("key", &key)])),
                }
            }
            ConfigAction::Set { key, value } => {
                state
                    .config_manager
                    .set_config_value(&key, &value)
                    .map_err(|e| anyhow::anyhow!(e.to_string()))?;
            }
        },
    }

    Ok(())
}

fn run_save(api: &RecorderApi, session: &Session, state: &AppState, args: SaveArgs) -> Result<()> {
    let d1_count = args.d1.len().to_string();
    if args.d1.len() != args.d2.len() {
        let d2_count = args.d2.len().to_string();
        bail!(t_with_args(
            "input.reading_count_mismatch",
            &[("d1", &d1_count), ("d2", &d2_count)]
        ));
    }
    if args.d1.len() > usize::from(STRANDS_PER_HEAT) {
        let max = STRANDS_PER_HEAT.to_string();
        bail!(t_with_args(
            "input.too_many_strands",
            &[("max", &max), ("count", &d1_count)]
        ));
    }

    let storage_loc = match args.storage {
        Some(s) => s,
        None => state
            .config_manager
            .get_default_storage_loc()
            .map_err(|e| anyhow::anyhow!(e.to_string()))?,
    };
    let billet_count = match args.billets {
        Some(n) => n,
        None => state
            .config_manager
            .get_default_billet_count()
            .map_err(|e| anyhow::anyhow!(e.to_string()))?,
    };

    let meta = HeatMeta {
        shift: args.shift,
        operator: args.operator,
        inspector: args.inspector,
        ccm: args.ccm,
        heat: args.heat,
        grade: args.grade,
        storage_loc,
        billet_count,
        short_billet_length: args.short_length,
    };

    let mut samples = Vec::new();
    for raw in &args.sample {
        let (strand, note) = raw
            .split_once('=')
            .with_context(|| t_with_args("input.sample_format", &[("value", raw.as_str())]))?;
        let strand = StrandPosition::from_label(strand)
            .with_context(|| t_with_args("input.invalid_strand", &[("strand", strand)]))?;
        samples.push((strand, note.to_string()));
    }

    let mut batch = api.prepare_batch(session, meta)?;
    if let Some(threshold) = args.threshold {
        batch = batch.with_threshold(threshold);
    }
    for (strand, (d1, d2)) in StrandPosition::all().zip(args.d1.iter().zip(args.d2.iter())) {
        let note = samples
            .iter()
            .find(|(s, _)| *s == strand)
            .map(|(_, n)| n.clone());
        batch = batch.with_strand(strand, *d1, *d2, note);
    }

    let outcome = api.save_batch(session, batch)?;
    let count_text = outcome.records.len().to_string();
    if outcome.records.is_empty() {
        println!("{}", t_with_args("save.nothing", &[("heat", &outcome.heat)]));
    } else {
        println!(
            "{}",
            t_with_args("save.success", &[("heat", &outcome.heat), ("count", &count_text)])
        );
        print_records(&outcome.records, false)?;
    }

    for alert in api.check_alerts(session)? {
        println!("{}", t_with_args("alerts.strand", &[("strand", &alert.strand)]));
    }
    Ok(())
}

fn print_records(records: &[StrandRecord], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }
    if records.is_empty() {
        println!("{}", t("records.empty"));
        return Ok(());
    }

    println!(
        "{:>6}  {:<19}  {:<10}  {:<4}  {:>8}  {:>8}  {:>6}  {:<6}  {:<12}  {}",
        "id", "timestamp", "heat", "std", "d1", "d2", "rh", "status", "operator", "storage"
    );
    for r in records {
        println!(
            "{:>6}  {:<19}  {:<10}  {:<4}  {:>8.2}  {:>8.2}  {:>6.2}  {:<6}  {:<12}  {}",
            r.id,
            r.timestamp.format("%Y-%m-%d %H:%M:%S"),
            r.heat,
            r.strand,
            r.d1,
            r.d2,
            r.rh,
            r.status.to_db_str(),
            r.operator,
            r.storage_loc
        );
    }
    Ok(())
}
