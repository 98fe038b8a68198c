use anyhow::{Context, Result};
use clap::{Arg, Command};
use light_sync::core::{Config, LightSyncConfig};
use light_sync::foundation::logging;
use light_sync::light::Light;
use light_sync::render::{LightSet, RenderParam};
use light_sync::scene::{DirtyBits, PrimPath};
use std::path::PathBuf;

mod description;
use description::SceneDescription;

fn main() -> Result<()> {
    let matches = Command::new("light_inspect")
        .about("Syncs the lights of a RON scene description and prints the resulting light records")
        .arg(
            Arg::new("scene")
                .value_name("FILE")
                .help("Scene description (.ron)")
                .required(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Light sync configuration (.toml or .ron)"),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("Overrides the configured log level"),
        )
        .get_matches();

    let scene_path = PathBuf::from(matches.get_one::<String>("scene").context("Missing scene argument")?);

    let mut config = match matches.get_one::<String>("config") {
        Some(path) => LightSyncConfig::load_from_file(path).with_context(|| format!("Failed to load config {}", path))?,
        None => LightSyncConfig::default(),
    };
    if let Some(level) = matches.get_one::<String>("log-level") {
        config = config.with_log_level(level.as_str());
    }
    config.validate().context("Invalid configuration")?;
    logging::init_with_level(&config.log_level);

    // Assets referenced by the scene resolve next to it first
    if let Some(dir) = scene_path.parent() {
        config.assets.search_paths.insert(0, dir.to_path_buf());
    }

    let description = SceneDescription::load(&scene_path)?;
    inspect(&description, &config)
}

fn inspect(description: &SceneDescription, config: &LightSyncConfig) -> Result<()> {
    let mut delegate = description.build_delegate();
    let mut render_param = RenderParam::from_config(config);
    let mut lights = LightSet::new();

    for prim in &description.lights {
        lights.insert(PrimPath::from(prim.path.as_str()), &prim.type_name, &mut render_param);
    }

    let synced = lights.sync(&delegate, &mut render_param);
    println!("Initial sync: {} light(s)", synced);
    print_lights(&lights);

    if !description.edits.is_empty() {
        for edit in &description.edits {
            let path = PrimPath::from(edit.path.as_str());
            let bits = match &edit.value {
                Some(value) => delegate.set(&path, &edit.name, value.clone()),
                None => delegate.clear(&path, &edit.name),
            };
            if bits == DirtyBits::CLEAN {
                log::warn!("Edit of {} on {} changed nothing", edit.name, edit.path);
            }
            lights.mark_dirty(&path, bits);
        }

        let synced = lights.sync(&delegate, &mut render_param);
        println!();
        println!("After {} edit(s): {} light(s) re-synced", description.edits.len(), synced);
        print_lights(&lights);
    }

    let stats = render_param.scene().stats();
    println!();
    println!(
        "Acceleration scene: {} geometries ({} attached, {} updated, {} detached), version {}",
        render_param.scene().geometry_count(),
        stats.attaches,
        stats.updates,
        stats.detaches,
        render_param.scene_version()
    );

    lights.finalize_all(&mut render_param);
    Ok(())
}

fn print_lights(lights: &LightSet) {
    let mut sorted: Vec<&Light> = lights.lights().collect();
    sorted.sort_by(|a, b| a.path().cmp(b.path()));

    for light in sorted {
        let data = light.data();
        let position = data.xform_light_to_world.column(3);
        println!("{} [{:?}]", light.path(), light.kind());
        println!("  state:      {:?}", light.state());
        println!("  position:   ({:.3}, {:.3}, {:.3})", position[0], position[1], position[2]);
        println!(
            "  radiance:   ({:.4}, {:.4}, {:.4}) scale {:.4}",
            data.radiance().x,
            data.radiance().y,
            data.radiance().z,
            data.emission_scale()
        );
        println!("  shape:      {:?}", data.shape);
        println!(
            "  visibility: visible={} camera={} shadow={}",
            data.visible, data.visible_camera, data.visible_shadow
        );
        if data.has_texture() {
            println!("  texture:    {}x{} from {:?}", data.texture.width, data.texture.height, data.texture.source);
        }
        if data.has_ies() {
            println!("  ies:        {:?}", data.shaping.ies.source);
        }
        if data.geometry_id.is_valid() {
            println!("  geometry:   {:?} {:?}", data.geometry_id, light.geometry().map(|g| g.kind()));
        }
    }
}
