mod common;

use containerconf::catalog::{DXVK_VERSIONS_REDUCED, GRAPHICS_DRIVERS};
use containerconf::config::ContainerConfig;
use containerconf::edit::{apply, FieldEdit};
use containerconf::gpu::VkVersion;
use containerconf::reconcile::{DxvkCatalog, DXVK_ASYNC};

use common::context;

fn record(driver: &str, wrapper: &str) -> ContainerConfig {
    ContainerConfig {
        graphics_driver: driver.to_string(),
        dxwrapper: wrapper.to_string(),
        ..ContainerConfig::default()
    }
}

fn driver_index(id: &str) -> usize {
    context(VkVersion::V1_3)
        .catalogs
        .graphics_driver_index(id)
        .unwrap_or_else(|| panic!("no driver {id}"))
}

#[test]
fn vkd3d_hides_dxvk_and_fills_vkd3d_settings() {
    let ctx = context(VkVersion::V1_3);
    for driver in ["vortek", "turnip", "adreno", "zink"] {
        let (config, sel) = ctx.reconcile(record(driver, "vkd3d"));
        assert_eq!(sel.dxvk_catalog, DxvkCatalog::Hidden, "{driver}");
        assert!(sel.dxvk_versions().is_empty(), "{driver}");
        assert!(!config.dxwrapper_config.vkd3d_version().is_empty(), "{driver}");
        assert!(!config.dxwrapper_config.vkd3d_feature_level().is_empty(), "{driver}");
    }
}

#[test]
fn vkd3d_pins_dxvk_version_per_driver_family() {
    let ctx = context(VkVersion::V1_3);
    let (vortek, _) = ctx.reconcile(record("vortek", "vkd3d"));
    assert_eq!(vortek.dxwrapper_config.version(), "1.10.3");
    let (turnip, _) = ctx.reconcile(record("turnip", "vkd3d"));
    assert_eq!(turnip.dxwrapper_config.version(), "2.4.1");
    assert!(!turnip.env_vars.has(DXVK_ASYNC));
}

#[test]
fn adreno_vkd3d_defaults() {
    let ctx = context(VkVersion::V1_3);
    let (config, _) = ctx.reconcile(record("adreno", "vkd3d"));
    assert_eq!(config.dxwrapper_config.vkd3d_version(), "2.6");
    assert_eq!(config.dxwrapper_config.vkd3d_feature_level(), "12_1");
}

#[test]
fn vkd3d_defaults_never_overwrite() {
    let ctx = context(VkVersion::V1_3);
    let mut config = record("turnip", "vkd3d");
    config.dxwrapper_config.set_vkd3d_version("2.8");
    config.dxwrapper_config.set_vkd3d_feature_level("11_0");
    let (config, _) = ctx.reconcile(config);
    assert_eq!(config.dxwrapper_config.vkd3d_version(), "2.8");
    assert_eq!(config.dxwrapper_config.vkd3d_feature_level(), "11_0");
}

#[test]
fn vortek_below_vulkan_1_3_gets_reduced_list() {
    let ctx = context(VkVersion::new(1, 1, 0));
    let (config, sel) = ctx.reconcile(record("vortek", "dxvk"));
    assert_eq!(sel.dxvk_catalog, DxvkCatalog::Reduced);
    assert_eq!(sel.dxvk_versions(), DXVK_VERSIONS_REDUCED);

    let async_index = DXVK_VERSIONS_REDUCED
        .iter()
        .position(|v| *v == "async-1.10.3")
        .unwrap();
    let (config, sel) = apply(&ctx, &config, &FieldEdit::DxvkVersion(async_index));
    assert_eq!(sel.dxvk_version, async_index);
    assert_eq!(config.dxwrapper_config.version(), "async-1.10.3");
    assert_eq!(config.env_vars.get(DXVK_ASYNC), Some("1"));
}

#[test]
fn turnip_below_vulkan_1_3_keeps_full_list() {
    let ctx = context(VkVersion::new(1, 1, 0));
    let (_, sel) = ctx.reconcile(record("turnip", "dxvk"));
    assert_eq!(sel.dxvk_catalog, DxvkCatalog::Full);
}

#[test]
fn async_flag_tracks_every_change() {
    let ctx = context(VkVersion::V1_3);
    let (config, sel) = ctx.reconcile(record("turnip", "dxvk"));
    assert!(sel.dxvk_versions()[sel.dxvk_version].contains("async"));
    assert_eq!(config.env_vars.get(DXVK_ASYNC), Some("1"));

    // Version change away from async.
    let plain = sel.dxvk_versions().iter().position(|v| *v == "2.4.1").unwrap();
    let (config, _) = apply(&ctx, &config, &FieldEdit::DxvkVersion(plain));
    assert!(!config.env_vars.has(DXVK_ASYNC));

    // Wrapper change to VKD3D keeps it off, back to DXVK keeps the stored version.
    let (config, _) = apply(&ctx, &config, &FieldEdit::DxWrapper(2));
    assert_eq!(config.dxwrapper, "vkd3d");
    assert!(!config.env_vars.has(DXVK_ASYNC));
    let (config, _) = apply(&ctx, &config, &FieldEdit::DxWrapper(1));
    assert_eq!(config.dxwrapper_config.version(), "2.4.1");
    assert!(!config.env_vars.has(DXVK_ASYNC));

    // Driver change onto a reduced list drops the version to the first entry.
    let ctx_old = context(VkVersion::new(1, 2, 0));
    let mut async_config = config.clone();
    async_config.dxwrapper_config.set_version("2.6.1-gplasync");
    let (async_config, _) = ctx_old.reconcile(async_config);
    assert!(async_config.env_vars.has(DXVK_ASYNC));
    let (moved, sel) = apply(&ctx_old, &async_config, &FieldEdit::GraphicsDriver(driver_index("vortek")));
    assert_eq!(sel.dxvk_catalog, DxvkCatalog::Reduced);
    assert_eq!(moved.dxwrapper_config.version(), DXVK_VERSIONS_REDUCED[0]);
    assert!(!moved.env_vars.has(DXVK_ASYNC));
}

#[test]
fn driver_change_resets_version() {
    let ctx = context(VkVersion::V1_3);
    let (config, _) = ctx.reconcile(record("turnip", "dxvk"));
    let (config, sel) = apply(&ctx, &config, &FieldEdit::GraphicsDriverVersion(2));
    assert_eq!(config.graphics_driver_version, "25.0.0");
    assert_eq!(sel.graphics_driver_version, 2);

    let (config, sel) = apply(&ctx, &config, &FieldEdit::GraphicsDriver(driver_index("adreno")));
    assert_eq!(config.graphics_driver, "adreno");
    assert_eq!(config.graphics_driver_version, "");
    assert_eq!(sel.graphics_driver_version, 0);
}

#[test]
fn selecting_same_driver_keeps_version() {
    let ctx = context(VkVersion::V1_3);
    let (config, _) = ctx.reconcile(record("turnip", "dxvk"));
    let (config, _) = apply(&ctx, &config, &FieldEdit::GraphicsDriverVersion(1));
    let (config, _) = apply(&ctx, &config, &FieldEdit::GraphicsDriver(driver_index("turnip")));
    assert_eq!(config.graphics_driver_version, "25.1.0");
}

#[test]
fn picking_default_driver_version_stores_empty() {
    let ctx = context(VkVersion::V1_3);
    let (config, _) = ctx.reconcile(record("turnip", "dxvk"));
    let (pinned, _) = apply(&ctx, &config, &FieldEdit::GraphicsDriverVersion(1));
    assert_eq!(pinned.graphics_driver_version, "25.1.0");

    let (back, sel) = apply(&ctx, &pinned, &FieldEdit::GraphicsDriverVersion(0));
    assert_eq!(back.graphics_driver_version, "");
    assert_eq!(sel.graphics_driver_version, 0);
    assert_eq!(back, config);
}

#[test]
fn dxvk_version_is_editable_under_wined3d() {
    let ctx = context(VkVersion::V1_3);
    let (config, sel) = ctx.reconcile(record("turnip", "wined3d"));
    assert_eq!(sel.dxvk_catalog, DxvkCatalog::Full);
    assert_eq!(config.env_vars.get(DXVK_ASYNC), Some("1"));

    let plain = sel.dxvk_versions().iter().position(|v| *v == "2.4.1").unwrap();
    let (config, sel) = apply(&ctx, &config, &FieldEdit::DxvkVersion(plain));
    assert_eq!(config.dxwrapper_config.version(), "2.4.1");
    assert_eq!(sel.dxvk_version, plain);
    assert!(!config.env_vars.has(DXVK_ASYNC));

    let (again, _) = ctx.reconcile(config.clone());
    assert_eq!(again, config);
}

#[test]
fn custom_driver_uses_zink_catalog() {
    let ctx = context(VkVersion::V1_3);
    let ctx = containerconf::reconcile::ReconcileContext::new(
        ctx.catalogs.with_custom_drivers(["Turnip-v25-custom"]),
        VkVersion::V1_3,
        8,
    );
    let (config, sel) = ctx.reconcile(record("Turnip-v25-custom", "dxvk"));
    assert_eq!(sel.graphics_driver, GRAPHICS_DRIVERS.len());
    assert_eq!(sel.graphics_driver_version, 0);
    assert_eq!(config.graphics_driver, "Turnip-v25-custom");
}

#[test]
fn unknown_values_stay_in_bounds() {
    let ctx = context(VkVersion::V1_3);
    let mut config = record("no-such-driver", "no-such-wrapper");
    config.audio_driver = "jack".to_string();
    config.screen_size = "1x1".to_string();
    config.video_pci_device_id = 0xdead;
    config.offscreen_rendering_mode = "pbuffer".to_string();
    config.video_memory_size = "3".to_string();
    config.box64_version = "9.9".to_string();
    config.box64_preset = "TURBO".to_string();
    config.graphics_driver_config = containerconf::config::GraphicsDriverConfig::parse(
        "vkMaxVersion=9.9,imageCacheSize=7,maxDeviceMemory=x",
    );

    let (config, sel) = ctx.reconcile(config);
    assert_eq!(sel.graphics_driver, 0);
    assert_eq!(sel.dx_wrapper, 0);
    assert_eq!(sel.audio_driver, 0);
    assert_eq!(sel.screen_size, 0);
    assert_eq!(sel.gpu_card, 0);
    assert_eq!(sel.rendering_mode, 0);
    assert_eq!(sel.video_memory, 0);
    assert_eq!(sel.box64_version, 0);
    assert_eq!(sel.box64_preset, 0);
    assert_eq!(config.graphics_driver_config.vk_max_version(), "1.3");
    assert_eq!(config.graphics_driver_config.image_cache_size(), "256");
    assert_eq!(config.graphics_driver_config.max_device_memory(), "4096");
    // Unknown values are reported, not rewritten.
    assert_eq!(config.graphics_driver, "no-such-driver");
    assert_eq!(config.audio_driver, "jack");
}

#[test]
fn reconcile_twice_is_a_no_op() {
    let ctx = context(VkVersion::new(1, 2, 0));
    for driver in ["vortek", "turnip", "adreno", "sd-8-elite", "virgl", "zink", "custom"] {
        for wrapper in ["wined3d", "dxvk", "vkd3d", "cnc-ddraw"] {
            let once = ctx.reconcile(record(driver, wrapper));
            let twice = ctx.reconcile(once.0.clone());
            assert_eq!(once, twice, "{driver}/{wrapper}");
        }
    }
}
