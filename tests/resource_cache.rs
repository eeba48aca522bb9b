//! Integration tests for texture loading, deduplication and texture arrays.

mod common;

use rstest::{fixture, rstest};

use common::{standard_codec, TestContext};
use graphics_commands::backend::ImageFormat;
use graphics_commands::resources::{
    DataTextureDesc, Fingerprint, ResourceError, TextureArrayDesc, TextureDesc,
};

#[fixture]
fn ctx() -> TestContext {
    TestContext::new(standard_codec())
}

fn data_desc<'a>(name: &'a str, data: &'a [u8]) -> DataTextureDesc<'a> {
    DataTextureDesc {
        debug_name: name,
        width: 1,
        height: 1,
        layers: 1,
        format: ImageFormat::R8G8B8A8Unorm,
        data,
    }
}

// ============================================================================
// Texture Loading
// ============================================================================

#[rstest]
fn test_same_path_loads_once(mut ctx: TestContext) {
    let first = ctx
        .resources
        .load_texture(&mut ctx.backend, &TextureDesc::new("textures/grass.png"))
        .unwrap();
    let second = ctx
        .resources
        .load_texture(&mut ctx.backend, &TextureDesc::new("textures/grass.png"))
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(ctx.decode_count(), 1);
    // Placeholder plus one loaded texture
    assert_eq!(ctx.backend_textures(), 2);
    assert_eq!(ctx.resources.texture_count(), 2);
}

#[rstest]
fn test_different_paths_get_different_handles(mut ctx: TestContext) {
    let grass = ctx
        .resources
        .load_texture(&mut ctx.backend, &TextureDesc::new("textures/grass.png"))
        .unwrap();
    let dirt = ctx
        .resources
        .load_texture(&mut ctx.backend, &TextureDesc::new("textures/dirt.png"))
        .unwrap();

    assert_ne!(grass, dirt);
    assert_ne!(
        ctx.resources.texture(grass).fingerprint,
        ctx.resources.texture(dirt).fingerprint
    );
}

#[rstest]
fn test_loaded_texture_records_fingerprint(mut ctx: TestContext) {
    let desc = TextureDesc::new("textures/rock.png");
    let handle = ctx.resources.load_texture(&mut ctx.backend, &desc).unwrap();

    let record = ctx.resources.texture(handle);
    assert_eq!(record.fingerprint, desc.fingerprint());
    assert_eq!(record.debug_name, "textures/rock.png");
    assert_eq!(record.object.width, 2);
}

#[rstest]
fn test_data_textures_are_never_deduplicated(mut ctx: TestContext) {
    let pixels = [1, 2, 3, 4];
    let a = ctx
        .resources
        .create_data_texture(&mut ctx.backend, &data_desc("noise", &pixels))
        .unwrap();
    let b = ctx
        .resources
        .create_data_texture(&mut ctx.backend, &data_desc("noise", &pixels))
        .unwrap();

    assert_ne!(a, b);
    assert!(ctx.resources.texture(a).fingerprint.is_none());
    assert_eq!(ctx.backend_textures(), 3);
}

#[rstest]
fn test_missing_file_is_propagated(mut ctx: TestContext) {
    let err = ctx
        .resources
        .load_texture(&mut ctx.backend, &TextureDesc::new("textures/missing.png"))
        .unwrap_err();

    assert!(matches!(err, ResourceError::Decode { .. }));
    assert!(err.to_string().contains("textures/missing.png"));
    assert_eq!(ctx.resources.texture_count(), 1);
}

#[rstest]
fn test_failed_load_is_not_cached(mut ctx: TestContext) {
    let desc = TextureDesc::new("textures/grass.png");
    ctx.backend.fail_next_creation();
    assert!(ctx.resources.load_texture(&mut ctx.backend, &desc).is_err());

    let handle = ctx.resources.load_texture(&mut ctx.backend, &desc).unwrap();
    assert!(handle.is_valid());
    assert_eq!(ctx.decode_count(), 2);
}

#[rstest]
#[case::wrong_length(1, 1, 1, 3)]
#[case::zero_width(0, 1, 1, 0)]
#[case::zero_layers(1, 1, 0, 0)]
#[should_panic(expected = "data texture 'bad'")]
fn test_invalid_data_texture_is_rejected(
    mut ctx: TestContext,
    #[case] width: u32,
    #[case] height: u32,
    #[case] layers: u32,
    #[case] len: usize,
) {
    let data = vec![0u8; len];
    let desc = DataTextureDesc {
        debug_name: "bad",
        width,
        height,
        layers,
        format: ImageFormat::R8G8B8A8Unorm,
        data: &data,
    };
    let _ = ctx.resources.create_data_texture(&mut ctx.backend, &desc);
}

// ============================================================================
// Texture Arrays
// ============================================================================

#[rstest]
fn test_new_array_is_fully_bound_to_placeholder(mut ctx: TestContext) {
    let array = ctx
        .resources
        .create_texture_array(
            &mut ctx.backend,
            &TextureArrayDesc {
                debug_name: "terrain".to_string(),
                capacity: 8,
            },
        )
        .unwrap();

    let entry = ctx.resources.texture_array(array);
    let placeholder_id = ctx.resources.texture(ctx.resources.placeholder()).object.id;
    assert!(entry.is_empty());
    assert_eq!(entry.binding_table().slots, vec![placeholder_id; 8]);
}

#[rstest]
#[case::partially_filled(6, 3)]
#[case::exactly_full(4, 4)]
fn test_array_slots_follow_insertion_order(
    mut ctx: TestContext,
    #[case] capacity: u32,
    #[case] inserted: usize,
) {
    let paths = [
        "textures/grass.png",
        "textures/dirt.png",
        "textures/rock.png",
        "textures/snow.png",
    ];
    let array = ctx
        .resources
        .create_texture_array(
            &mut ctx.backend,
            &TextureArrayDesc {
                debug_name: "terrain".to_string(),
                capacity,
            },
        )
        .unwrap();

    let mut loaded = Vec::new();
    for (i, path) in paths.iter().take(inserted).enumerate() {
        let (index, texture) = ctx
            .resources
            .load_texture_into_array(&mut ctx.backend, &TextureDesc::new(*path), array)
            .unwrap();
        assert_eq!(index as usize, i);
        loaded.push(texture);
    }

    let entry = ctx.resources.texture_array(array);
    assert_eq!(entry.members(), loaded.as_slice());
    assert_eq!(entry.len(), entry.fingerprints().len());

    let placeholder_id = ctx.resources.texture(ctx.resources.placeholder()).object.id;
    let slots = &entry.binding_table().slots;
    assert_eq!(slots.len(), capacity as usize);
    for (index, slot) in slots.iter().enumerate() {
        let expected = match loaded.get(index) {
            Some(texture) => ctx.resources.texture(*texture).object.id,
            None => placeholder_id,
        };
        assert_eq!(*slot, expected, "slot {index}");
    }
}

#[rstest]
fn test_reinsert_returns_existing_slot(mut ctx: TestContext) {
    let array = ctx
        .resources
        .create_texture_array(
            &mut ctx.backend,
            &TextureArrayDesc {
                debug_name: "terrain".to_string(),
                capacity: 4,
            },
        )
        .unwrap();
    let grass = TextureDesc::new("textures/grass.png");
    let dirt = TextureDesc::new("textures/dirt.png");

    ctx.resources
        .load_texture_into_array(&mut ctx.backend, &grass, array)
        .unwrap();
    let (dirt_index, dirt_handle) = ctx
        .resources
        .load_texture_into_array(&mut ctx.backend, &dirt, array)
        .unwrap();
    let writes = ctx.backend.stats().binding_writes;

    let again = ctx
        .resources
        .load_texture_into_array(&mut ctx.backend, &dirt, array)
        .unwrap();

    assert_eq!(again, (dirt_index, dirt_handle));
    assert_eq!(ctx.resources.texture_array(array).len(), 2);
    assert_eq!(ctx.backend.stats().binding_writes, writes);
}

#[rstest]
fn test_texture_shared_between_arrays(mut ctx: TestContext) {
    let desc = |name: &str| TextureArrayDesc {
        debug_name: name.to_string(),
        capacity: 2,
    };
    let first = ctx
        .resources
        .create_texture_array(&mut ctx.backend, &desc("first"))
        .unwrap();
    let second = ctx
        .resources
        .create_texture_array(&mut ctx.backend, &desc("second"))
        .unwrap();
    let rock = TextureDesc::new("textures/rock.png");

    let (_, a) = ctx
        .resources
        .load_texture_into_array(&mut ctx.backend, &rock, first)
        .unwrap();
    let (index, b) = ctx
        .resources
        .load_texture_into_array(&mut ctx.backend, &rock, second)
        .unwrap();

    assert_eq!(a, b);
    assert_eq!(index, 0);
    assert_eq!(ctx.decode_count(), 1);
    assert_eq!(ctx.resources.texture_array(second).len(), 1);
}

#[rstest]
fn test_data_textures_in_array_always_append(mut ctx: TestContext) {
    let array = ctx
        .resources
        .create_texture_array(
            &mut ctx.backend,
            &TextureArrayDesc {
                debug_name: "decals".to_string(),
                capacity: 3,
            },
        )
        .unwrap();
    let pixels = [9, 9, 9, 255];

    let (first, _) = ctx
        .resources
        .create_data_texture_into_array(&mut ctx.backend, &data_desc("decal", &pixels), array)
        .unwrap();
    let (second, _) = ctx
        .resources
        .create_data_texture_into_array(&mut ctx.backend, &data_desc("decal", &pixels), array)
        .unwrap();

    assert_eq!((first, second), (0, 1));
    assert!(ctx
        .resources
        .texture_array(array)
        .fingerprints()
        .iter()
        .all(Fingerprint::is_none));
}

#[rstest]
#[should_panic(expected = "texture array 'tiny' is full")]
fn test_array_capacity_is_enforced(mut ctx: TestContext) {
    let array = ctx
        .resources
        .create_texture_array(
            &mut ctx.backend,
            &TextureArrayDesc {
                debug_name: "tiny".to_string(),
                capacity: 1,
            },
        )
        .unwrap();
    ctx.resources
        .load_texture_into_array(&mut ctx.backend, &TextureDesc::new("textures/grass.png"), array)
        .unwrap();
    let _ = ctx.resources.load_texture_into_array(
        &mut ctx.backend,
        &TextureDesc::new("textures/dirt.png"),
        array,
    );
}

#[rstest]
#[should_panic(expected = "non-zero capacity")]
fn test_zero_capacity_array_is_rejected(mut ctx: TestContext) {
    let _ = ctx.resources.create_texture_array(
        &mut ctx.backend,
        &TextureArrayDesc {
            debug_name: "empty".to_string(),
            capacity: 0,
        },
    );
}

#[cfg(unix)]
#[rstest]
fn test_non_utf8_paths_load_separately() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    use std::path::PathBuf;

    let first = PathBuf::from(OsStr::from_bytes(b"textures/a\xff.png"));
    let second = PathBuf::from(OsStr::from_bytes(b"textures/a\xfe.png"));
    let mut ctx = TestContext::new(
        standard_codec()
            .with_path(first.clone(), [255, 0, 0, 255])
            .with_path(second.clone(), [0, 0, 255, 255]),
    );

    let a = ctx
        .resources
        .load_texture(&mut ctx.backend, &TextureDesc::new(first))
        .unwrap();
    let b = ctx
        .resources
        .load_texture(&mut ctx.backend, &TextureDesc::new(second))
        .unwrap();

    assert_ne!(a, b);
    assert_eq!(ctx.decode_count(), 2);
}

// ============================================================================
// Concurrent reads
// ============================================================================

#[rstest]
fn test_resolve_from_several_threads(mut ctx: TestContext) {
    let grass = ctx
        .resources
        .load_texture(&mut ctx.backend, &TextureDesc::new("textures/grass.png"))
        .unwrap();
    let rock = ctx
        .resources
        .load_texture(&mut ctx.backend, &TextureDesc::new("textures/rock.png"))
        .unwrap();
    let resources = &ctx.resources;

    let ids = std::thread::scope(|scope| {
        let workers: Vec<_> = [grass, rock]
            .into_iter()
            .map(|handle| scope.spawn(move || resources.texture(handle).object.id))
            .collect();
        workers
            .into_iter()
            .map(|worker| worker.join().unwrap())
            .collect::<Vec<_>>()
    });

    assert_eq!(ids[0], resources.texture(grass).object.id);
    assert_eq!(ids[1], resources.texture(rock).object.id);
    assert_ne!(ids[0], ids[1]);
}
