use cgmath::{Matrix4, Vector3 as V3};
use float_eq::assert_float_eq;
use vertsync::{
    set_verts, set_verts_flat, set_verts_merged, sync_merged, sync_positions, MeshPart,
    SyncConfig, SyncError, SyncOutcome,
};
use vertsync_mesh::{HostMeshBuffer, Vector3, VertexRecord};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn tagged_records(n: usize) -> Vec<VertexRecord> {
    (0..n)
        .map(|i| VertexRecord {
            co: [i as f32; 3],
            no: [i as i16, -(i as i16), 32767],
            flag: (i % 3) as i8,
            bweight: -1,
        })
        .collect()
}

#[test]
fn only_coordinates_change() {
    init();
    let before = tagged_records(3);
    let mut mesh = HostMeshBuffer::from_records(before.clone());
    set_verts(
        &mut mesh.view(),
        &[
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(4.0, 5.0, 6.0),
            Vector3::new(7.0, 8.0, 9.0),
        ],
    )
    .unwrap();

    for (old, new) in before.iter().zip(mesh.records()) {
        assert_eq!(old.no, new.no);
        assert_eq!(old.flag, new.flag);
        assert_eq!(old.bweight, new.bweight);
    }
    assert_eq!([7.0, 8.0, 9.0], mesh.records()[2].co);
}

#[test]
fn too_few_positions_leaves_mesh_untouched() {
    init();
    let before = tagged_records(4);
    let mut mesh = HostMeshBuffer::from_records(before.clone());
    let err = set_verts(&mut mesh.view(), &[Vector3::new(1.0, 1.0, 1.0)]).unwrap_err();
    assert_eq!(
        SyncError::VertexCountMismatch {
            expected: 4,
            actual: 1
        },
        err
    );
    assert_eq!(before.as_slice(), mesh.records());
}

#[test]
fn flat_and_structured_agree() {
    let positions = [
        Vector3::new(0.5, -1.5, 2.25),
        Vector3::new(f32::MAX, f32::MIN, -0.0),
    ];
    let flat = [0.5, -1.5, 2.25, f32::MAX, f32::MIN, -0.0];

    let mut a = HostMeshBuffer::from_records(tagged_records(2));
    let mut b = HostMeshBuffer::from_records(tagged_records(2));
    set_verts(&mut a.view(), &positions).unwrap();
    set_verts_flat(&mut b.view(), &flat).unwrap();
    assert_eq!(a.records(), b.records());
    assert_eq!((-0.0f32).to_bits(), b.records()[1].co[2].to_bits());
}

#[test]
fn fixed_sync_writes_when_counts_match() {
    init();
    let mut mesh = HostMeshBuffer::from_records(tagged_records(2));
    let positions = [Vector3::new(1.0, 2.0, 3.0), Vector3::new(4.0, 5.0, 6.0)];
    let outcome = sync_positions(&mut mesh.view(), &positions, &SyncConfig::default());
    assert_eq!(SyncOutcome::Updated { count: 2 }, outcome);
    assert_eq!(positions.to_vec(), mesh.positions());
}

#[test]
fn fixed_sync_asks_for_rebuild_on_new_count() {
    init();
    let before = tagged_records(2);
    let mut mesh = HostMeshBuffer::from_records(before.clone());
    let outcome = sync_positions(
        &mut mesh.view(),
        &[Vector3::new(1.0, 2.0, 3.0); 5],
        &SyncConfig::default(),
    );
    assert_eq!(
        SyncOutcome::NeedsRebuild {
            current: 2,
            proposed: 5
        },
        outcome
    );
    assert_eq!(before.as_slice(), mesh.records());
}

#[test]
fn merged_without_matrices_is_concatenation() {
    let first = [Vector3::new(1.0, 2.0, 3.0)];
    let second = [Vector3::new(4.0, 5.0, 6.0), Vector3::new(7.0, 8.0, 9.0)];

    let mut merged = HostMeshBuffer::from_records(tagged_records(3));
    set_verts_merged(
        &mut merged.view(),
        &[MeshPart::new(&first), MeshPart::new(&second)],
    )
    .unwrap();

    let mut plain = HostMeshBuffer::from_records(tagged_records(3));
    let all: Vec<Vector3> = first.iter().chain(&second).copied().collect();
    set_verts(&mut plain.view(), &all).unwrap();

    assert_eq!(plain.records(), merged.records());
}

#[test]
fn merged_applies_each_part_matrix() {
    let first = [Vector3::new(1.0, 2.0, 3.0)];
    let second = [Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0)];

    let mut mesh = HostMeshBuffer::from_records(tagged_records(3));
    set_verts_merged(
        &mut mesh.view(),
        &[
            MeshPart::new(&first),
            MeshPart::new(&second).with_matrix(
                Matrix4::from_translation(V3::new(10.0, 0.0, -5.0)) * Matrix4::from_scale(2.0),
            ),
        ],
    )
    .unwrap();

    let out = mesh.positions();
    assert_eq!(Vector3::new(1.0, 2.0, 3.0), out[0]);
    assert_float_eq!(out[1].x, 10.0, abs <= 0.0001);
    assert_float_eq!(out[1].y, 0.0, abs <= 0.0001);
    assert_float_eq!(out[1].z, -5.0, abs <= 0.0001);
    assert_float_eq!(out[2].x, 12.0, abs <= 0.0001);
    assert_float_eq!(out[2].y, 2.0, abs <= 0.0001);
    assert_float_eq!(out[2].z, -3.0, abs <= 0.0001);
}

#[test]
fn merged_count_mismatch_writes_nothing() {
    let before = tagged_records(2);
    let mut mesh = HostMeshBuffer::from_records(before.clone());
    let part = [Vector3::new(1.0, 1.0, 1.0); 2];
    let err = set_verts_merged(
        &mut mesh.view(),
        &[MeshPart::new(&part), MeshPart::new(&part)],
    )
    .unwrap_err();
    assert_eq!(
        SyncError::VertexCountMismatch {
            expected: 2,
            actual: 4
        },
        err
    );
    assert_eq!(before.as_slice(), mesh.records());
}

#[test]
fn merged_matrix_skips_perspective_divide() {
    let mut m: Matrix4<f32> = Matrix4::from_scale(1.0);
    m.w.w = 2.0;
    let part = [Vector3::new(2.0, 4.0, 6.0)];

    let mut mesh = HostMeshBuffer::from_records(tagged_records(1));
    set_verts_merged(&mut mesh.view(), &[MeshPart::new(&part).with_matrix(m)]).unwrap();
    assert_eq!([2.0, 4.0, 6.0], mesh.records()[0].co);
}

#[test]
fn fixed_merged_writes_when_total_matches() {
    init();
    let first = [Vector3::new(1.0, 2.0, 3.0)];
    let second = [Vector3::new(1.0, 1.0, 1.0)];

    let mut mesh = HostMeshBuffer::from_records(tagged_records(2));
    let outcome = sync_merged(
        &mut mesh.view(),
        &[
            MeshPart::new(&first),
            MeshPart::new(&second)
                .with_matrix(Matrix4::from_translation(V3::new(0.0, 0.0, 5.0))),
        ],
        &SyncConfig::default(),
    );
    assert_eq!(SyncOutcome::Updated { count: 2 }, outcome);
    assert_eq!([1.0, 2.0, 3.0], mesh.records()[0].co);
    assert_eq!([1.0, 1.0, 6.0], mesh.records()[1].co);
}

#[test]
fn fixed_merged_asks_for_rebuild_on_new_count() {
    init();
    let before = tagged_records(2);
    let mut mesh = HostMeshBuffer::from_records(before.clone());
    let part = [Vector3::new(1.0, 1.0, 1.0); 2];
    let outcome = sync_merged(
        &mut mesh.view(),
        &[MeshPart::new(&part), MeshPart::new(&part)],
        &SyncConfig::default(),
    );
    assert_eq!(
        SyncOutcome::NeedsRebuild {
            current: 2,
            proposed: 4
        },
        outcome
    );
    assert_eq!(before.as_slice(), mesh.records());
}

#[test]
fn merged_rebuild_when_fixed_verts_disabled() {
    let before = tagged_records(2);
    let mut mesh = HostMeshBuffer::from_records(before.clone());
    let part = [Vector3::new(1.0, 1.0, 1.0); 2];
    let outcome = sync_merged(
        &mut mesh.view(),
        &[MeshPart::new(&part)],
        &SyncConfig { fixed_verts: false },
    );
    assert_eq!(
        SyncOutcome::NeedsRebuild {
            current: 2,
            proposed: 2
        },
        outcome
    );
    assert_eq!(before.as_slice(), mesh.records());
}
