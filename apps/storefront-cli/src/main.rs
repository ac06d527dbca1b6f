use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use storefront_assets::{resolve_image_url, FsTextureSource, TextureLoader};
use storefront_common::{
    DeviceClassPreference, Dimensions, ShopConfig, StorefrontSettings, WallName,
};
use storefront_controller::{
    CameraPose, ControllerConfig, DeviceClass, DeviceHints, FirstPersonController, MovementBounds,
};
use storefront_input::MovementIntent;
use storefront_render::{DebugTextRenderer, RenderView, Renderer};
use storefront_scene::{SceneBuilder, ShopLayout};
use storefront_store::{
    public_config_or_default, AdminCredential, ConfigService, FileConfigStore, InfoUpdate,
    ShopInfoPatch, UploadedFile,
};
use tracing_subscriber::EnvFilter;

/// How long `scene --load-textures` waits for the loader to settle.
const TEXTURE_WAIT: Duration = Duration::from_secs(5);

#[derive(Parser)]
#[command(name = "storefront-cli", about = "CLI tool for storefront operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Shop data directory (overrides settings)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, settings and a summary of the stored shop
    Info,
    /// Build the scene from the public config and dump it as text
    Scene {
        /// Load textures before dumping so resolved surfaces show as textured
        #[arg(long)]
        load_textures: bool,
    },
    /// Simulate walking from the street with a constant input
    Walk {
        #[arg(long, value_enum, default_value_t = DeviceArg::Auto)]
        device: DeviceArg,
        /// Seconds to simulate
        #[arg(long, default_value = "3")]
        seconds: f32,
        /// Frames per simulated second
        #[arg(long, default_value = "60")]
        fps: u32,
        /// Strafe axis: +1 left, -1 right
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        move_x: f32,
        /// Travel axis: +1 forward, -1 backward
        #[arg(long, default_value = "1", allow_negative_numbers = true)]
        move_z: f32,
        /// Yaw rate: +1 turns right
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        look_x: f32,
        /// Pitch rate: +1 tilts down
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        look_y: f32,
    },
    /// Authenticated operations on the stored shop config
    Admin {
        /// Admin token (defaults to the one in settings)
        #[arg(long)]
        token: Option<String>,

        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Print the full config as JSON
    Show,
    /// Update the shop name, info fields or dimensions
    SetInfo {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        hours: Option<String>,
        #[arg(long)]
        contact: Option<String>,
        #[arg(long)]
        whatsapp: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Dimensions as WIDTHxHEIGHTxDEPTH in metres, e.g. 8x2.6x8
        #[arg(long, value_parser = parse_dimensions)]
        dimensions: Option<Dimensions>,
    },
    /// Resize the left-wall grid; tiles outside it are kept
    SetGrid { rows: u32, cols: u32 },
    /// Upload an image for one wall (front, back, right, floor, ceiling)
    UploadWall { wall: WallName, file: PathBuf },
    /// Upload an image for one left-wall tile
    UploadTile { row: u32, col: u32, file: PathBuf },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DeviceArg {
    Auto,
    Constrained,
    Desktop,
}

impl From<DeviceArg> for DeviceClassPreference {
    fn from(arg: DeviceArg) -> Self {
        match arg {
            DeviceArg::Auto => DeviceClassPreference::Auto,
            DeviceArg::Constrained => DeviceClassPreference::Constrained,
            DeviceArg::Desktop => DeviceClassPreference::Desktop,
        }
    }
}

fn parse_dimensions(s: &str) -> Result<Dimensions, String> {
    let parts: Vec<f32> = s
        .split(['x', 'X'])
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("bad number in {s:?}: {e}"))?;
    match parts[..] {
        [width, height, depth] => Ok(Dimensions {
            width,
            height,
            depth,
        }),
        _ => Err(format!("expected WIDTHxHEIGHTxDEPTH, got {s:?}")),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut settings = StorefrontSettings::load_or_default(cli.settings.as_deref())
        .context("loading settings")?;
    if let Some(dir) = cli.data_dir {
        settings.data_dir = dir;
    }
    tracing::debug!(data_dir = %settings.data_dir.display(), "settings resolved");

    match cli.command {
        Commands::Info => {
            println!("storefront-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("data dir: {}", settings.data_dir.display());
            println!("image base: {}", settings.image_base());

            let store = FileConfigStore::open(&settings.data_dir, &settings.admin_token)?;
            let config = public_config_or_default(&store);
            let d = config.dimensions;
            println!("shop: {}", config.shop_name);
            println!("dimensions: {} x {} x {} m", d.width, d.height, d.depth);
            println!(
                "grid: {} x {}, tiles: {} visible, {} orphaned",
                config.grid_dimensions.rows,
                config.grid_dimensions.cols,
                config.visible_tiles().len(),
                config.orphaned_tiles().len()
            );

            let scene = build_scene(&settings, &config);
            println!(
                "scene: {} primitives, fingerprint={:#018x}",
                scene.len(),
                scene.fingerprint()
            );
            for url in scene.texture_urls() {
                match resolve_image_url(&settings.image_base(), url) {
                    Some(resolved) => println!("  texture {url} -> {resolved}"),
                    None => println!("  texture {url} -> (unresolvable)"),
                }
            }
        }
        Commands::Scene { load_textures } => {
            let store = FileConfigStore::open(&settings.data_dir, &settings.admin_token)?;
            let config = public_config_or_default(&store);
            let scene = build_scene(&settings, &config);

            let mut loader = TextureLoader::new(
                Arc::new(FsTextureSource::new(".")),
                settings.image_base(),
                settings.texture_workers,
            );
            if load_textures {
                loader.request_all(scene.texture_urls());
                let started = Instant::now();
                while loader.cache().pending() > 0 && started.elapsed() < TEXTURE_WAIT {
                    loader.poll();
                    std::thread::sleep(Duration::from_millis(10));
                }
                loader.poll();
            }

            let output = DebugTextRenderer::new().render(&scene, loader.cache(), &RenderView::default());
            print!("{output}");
        }
        Commands::Walk {
            device,
            seconds,
            fps,
            move_x,
            move_z,
            look_x,
            look_y,
        } => {
            let store = FileConfigStore::open(&settings.data_dir, &settings.admin_token)?;
            let config = public_config_or_default(&store);
            let layout = ShopLayout::from_config(&config);

            // Headless runs assume a desktop-sized screen without touch.
            let hints = DeviceHints {
                screen_width: 1920.0,
                ..DeviceHints::default()
            };
            let preference = match device {
                DeviceArg::Auto => settings.device_class,
                other => other.into(),
            };
            let class = DeviceClass::resolve(preference, &hints);

            let mut controller = FirstPersonController::new(
                ControllerConfig::new(class),
                &layout,
                CameraPose::default(),
            );
            let mut intent = MovementIntent::new();
            intent.set_move(move_x, move_z);
            intent.set_look(look_x, look_y);

            let fps = fps.max(1);
            let dt = 1.0 / fps as f32;
            let frames = (seconds.max(0.0) * fps as f32).round() as u32;
            println!("Walk: device={class:?}, frames={frames}, intent={intent:?}");
            print_pose(0, controller.pose());
            for frame in 1..=frames {
                controller.update(&intent, dt);
                if frame % fps == 0 || frame == frames {
                    print_pose(frame, controller.pose());
                }
            }
            println!(
                "indoors: {}",
                MovementBounds::is_indoors(controller.pose().position)
            );
        }
        Commands::Admin { token, action } => {
            let credential =
                AdminCredential::new(token.unwrap_or_else(|| settings.admin_token.clone()));
            let mut store = FileConfigStore::open(&settings.data_dir, &settings.admin_token)?;
            run_admin(&mut store, &credential, action)?;
        }
    }

    Ok(())
}

fn build_scene(settings: &StorefrontSettings, config: &ShopConfig) -> storefront_scene::Scene {
    SceneBuilder::new()
        .with_sky_texture(settings.sky_texture.clone())
        .build(config)
}

fn print_pose(frame: u32, pose: &CameraPose) {
    let p = pose.position;
    println!(
        "frame {frame:>5}: pos=({:.2}, {:.2}, {:.2}) yaw={:.3} pitch={:.3}",
        p.x, p.y, p.z, pose.yaw, pose.pitch
    );
}

fn run_admin(
    store: &mut dyn ConfigService,
    credential: &AdminCredential,
    action: AdminAction,
) -> anyhow::Result<()> {
    match action {
        AdminAction::Show => {
            let config = store.fetch_admin_config(credential)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        AdminAction::SetInfo {
            name,
            address,
            hours,
            contact,
            whatsapp,
            description,
            dimensions,
        } => {
            let patch = ShopInfoPatch {
                address,
                opening_hours: hours,
                contact_number: contact,
                whatsapp_number: whatsapp,
                description,
            };
            let update = InfoUpdate {
                shop_name: name,
                info: (patch != ShopInfoPatch::default()).then_some(patch),
                dimensions,
            };
            let config = store.update_info(credential, &update)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        AdminAction::SetGrid { rows, cols } => {
            let config = store.update_grid(credential, rows, cols)?;
            println!(
                "grid: {} x {}, orphaned tiles: {}",
                config.grid_dimensions.rows,
                config.grid_dimensions.cols,
                config.orphaned_tiles().len()
            );
        }
        AdminAction::UploadWall { wall, file } => {
            let upload = read_upload(&file)?;
            let receipt = store.upload_wall_image(credential, wall, &upload)?;
            println!("{wall}: {}", receipt.image_url);
        }
        AdminAction::UploadTile { row, col, file } => {
            let upload = read_upload(&file)?;
            let receipt = store.upload_left_tile(credential, row, col, &upload)?;
            println!("tile ({row}, {col}): {}", receipt.image_url);
        }
    }
    Ok(())
}

fn read_upload(path: &std::path::Path) -> anyhow::Result<UploadedFile> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(UploadedFile { file_name, bytes })
}
