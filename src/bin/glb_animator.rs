//! Headless GLB animator.
//!
//! Loads a `.glb` file, applies a motion profile (or the clip that overrides
//! it) for a number of frames and prints the root transform.
//!
//! ```text
//! glb_animator [--settings <file.json>] <model.glb> [profile] [frames]
//! RUST_LOG=debug glb_animator robot.glb walk 120
//! ```

use anyhow::{Context, bail};
use glb_animator::motion::ProfileId;
use glb_animator::{
    AnimatorSettings, HeadlessRenderer, LocalFile, ManualFrameLoop, TempHandleStore, ViewerSession,
};

const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u32 = 60;
const USAGE: &str = "usage: glb_animator [--settings <file.json>] <model.glb> [profile] [frames]";

struct Args {
    settings: Option<String>,
    model: String,
    profile: Option<ProfileId>,
    frames: u32,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut settings = None;
    let mut positional = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--settings" {
            settings = Some(args.next().context("--settings needs a path")?);
        } else if arg == "-h" || arg == "--help" {
            println!("{USAGE}\n\nprofiles:");
            for profile in ProfileId::ALL {
                println!("  {:<8} {}", profile.as_str(), profile.description());
            }
            std::process::exit(0);
        } else {
            positional.push(arg);
        }
    }

    let mut positional = positional.into_iter();
    let Some(model) = positional.next() else {
        bail!(USAGE);
    };
    let profile = positional.next().map(|p| p.parse::<ProfileId>()).transpose()?;
    let frames = match positional.next() {
        Some(n) => n.parse().with_context(|| format!("invalid frame count '{n}'"))?,
        None => DEFAULT_FRAMES,
    };

    Ok(Args {
        settings,
        model,
        profile,
        frames,
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = parse_args()?;
    let mut settings = match &args.settings {
        Some(path) => AnimatorSettings::from_path(path)?,
        None => AnimatorSettings::default(),
    };
    // the model comes from the command line
    settings.initial_model_uri = None;
    if let Some(profile) = args.profile {
        settings.initial_profile = profile;
    }

    let store = TempHandleStore::new();
    let mut renderer = HeadlessRenderer::new(store.clone());
    if let Some(root) = &settings.asset_root {
        renderer = renderer.with_asset_root(root);
    }
    let mut session = ViewerSession::new(renderer, ManualFrameLoop::new(), store, settings);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create runtime")?;
    rt.block_on(async {
        let file = LocalFile::from_path(&args.model)
            .await
            .with_context(|| format!("reading {}", args.model))?;
        session.on_file_accepted(file).await?;
        anyhow::Ok(())
    })?;

    let asset = session.current_asset().context("no asset after load")?;
    let root = asset.root().context("asset has no root node")?;
    println!("model:   {}", session.file_name());
    println!("clips:   {:?}", asset.clip_names());
    println!("profile: {}", session.active_profile().display_name());
    if let Some(clip) = session.active_clip_name() {
        println!("playing: {clip}");
    }

    let mut applied = 0;
    for _ in 0..args.frames {
        applied += session.frame(FRAME_DT);
    }

    let Some(node) = session.renderer().graph().get_node(root) else {
        bail!("root node vanished");
    };
    let t = &node.transform;
    println!("frames:  {applied}/{}", args.frames);
    println!("position: {:?}", t.position);
    println!("rotation: {:?}", t.rotation);
    println!("scale:    {:?}", t.scale);

    if let Some(export) = session.export_request() {
        println!("export:  {}", serde_json::to_string(&export)?);
    }

    session.teardown();
    Ok(())
}
