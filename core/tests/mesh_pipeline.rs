use lattice_core::MeshError;
use lattice_core::mesh::generators::{create_cube, create_from_vertices, create_quad, create_sphere};
use lattice_core::mesh::{
    Capabilities, ComponentKind, DestinationVertexKind, FaceType, Mesh, PositionNormalUv,
    PrimitiveArity, VertexLayoutDefinition,
};
use rstest::rstest;

fn unit_quad() -> Mesh {
    let corners = [
        ([0.0, 0.0, 0.0], [0.0, 0.0]),
        ([1.0, 0.0, 0.0], [1.0, 0.0]),
        ([1.0, 1.0, 0.0], [1.0, 1.0]),
        ([0.0, 1.0, 0.0], [0.0, 1.0]),
    ]
    .map(|(position, uv)| PositionNormalUv {
        position,
        normal: [0.0, 0.0, 1.0],
        uv,
    });
    create_from_vertices(&corners, &[0, 1, 2, 3], FaceType::Quad).unwrap()
}

// ---------------------------------------------------------------------------
// Build → lower
// ---------------------------------------------------------------------------

#[test]
fn quad_lowers_to_six_unwelded_vertices() {
    let mesh = unit_quad();
    assert_eq!(mesh.material_ids().iter().copied().collect::<Vec<_>>(), [0]);

    let data = mesh.get_mesh_data(0).unwrap();
    assert_eq!(data.arity, PrimitiveArity::Triangles);
    assert_eq!(data.vertex_count(), 6);
    assert_eq!(&data.index_buffer[..], &[0, 1, 2, 3, 4, 5]);
    assert_eq!(data.vertex_kind(), DestinationVertexKind::PositionNormalUv);
    assert_eq!(data.vertex_bytes().len(), 6 * 32);

    // (v0, v1, v2) then (v2, v3, v1)
    let vertices = data.vertex_buffer.as_position_normal_uv().unwrap();
    let positions: Vec<[f32; 3]> = vertices.iter().map(|v| v.position).collect();
    assert_eq!(
        positions,
        [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 0.0, 0.0],
        ]
    );
    assert!(vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
}

#[test]
fn lowering_leaves_source_untouched() {
    let mesh = unit_quad();
    let before = mesh.clone();
    let _ = mesh.get_mesh_data(0).unwrap();
    assert_eq!(mesh, before);
}

#[test]
fn incompatible_layout_is_rejected() {
    let mut mesh = Mesh::new();
    mesh.add_component(ComponentKind::Position2).unwrap();
    mesh.add_component(ComponentKind::Color).unwrap();
    mesh.set_vertex_count(3);
    mesh.add_face(&[0, 1, 2]).unwrap();

    let err = mesh.get_mesh_data(0).unwrap_err();
    assert_eq!(
        err,
        MeshError::IncompatibleVertexLayout(Capabilities::POSITION2 | Capabilities::COLOR)
    );
    assert!(err.to_string().starts_with("incompatible vertex layout"));
}

#[test]
fn tail_face_of_five_corners_is_rejected() {
    let mut mesh = Mesh::new();
    mesh.add_component(ComponentKind::Position3).unwrap();
    mesh.set_vertex_count(5);

    let err = mesh.add_face_from_tail(5).unwrap_err();
    assert_eq!(err, MeshError::UnsupportedFaceArity(5));
    assert!(err.to_string().starts_with("unsupported topology"));
    assert_eq!(mesh.face_count(), 0);
}

#[test]
fn materials_lower_separately() {
    let mut mesh = Mesh::new();
    mesh.add_component(ComponentKind::Position3).unwrap();
    mesh.add_component(ComponentKind::Color).unwrap();
    mesh.set_vertex_count(7);
    mesh.add_face_with_material(0, &[0, 1, 2]).unwrap();
    mesh.add_face_with_material(3, &[2, 3, 4, 5]).unwrap();
    mesh.add_face_with_material(3, &[4, 5, 6]).unwrap();

    let all = mesh.get_all_mesh_data().unwrap();
    let summary: Vec<(u32, usize)> = all
        .iter()
        .map(|data| (data.material_id, data.primitive_count()))
        .collect();
    assert_eq!(summary, [(0, 1), (3, 3)]);
    assert!(all
        .iter()
        .all(|data| data.vertex_kind() == DestinationVertexKind::PositionColor));
}

#[test]
fn unused_material_lowers_to_empty_buffers() {
    let data = unit_quad().get_mesh_data(9).unwrap();
    assert_eq!(data.vertex_count(), 0);
    assert_eq!(data.index_count(), 0);
}

// ---------------------------------------------------------------------------
// Layout selection
// ---------------------------------------------------------------------------

#[rstest]
#[case::position_normal_uv(
    &[ComponentKind::Position3, ComponentKind::Normal, ComponentKind::Uv],
    Some(DestinationVertexKind::PositionNormalUv)
)]
#[case::declaration_order_is_irrelevant(
    &[ComponentKind::Uv, ComponentKind::Position3, ComponentKind::Normal],
    Some(DestinationVertexKind::PositionNormalUv)
)]
#[case::position_normal_color(
    &[ComponentKind::Position3, ComponentKind::Normal, ComponentKind::Color],
    Some(DestinationVertexKind::PositionNormalColor)
)]
#[case::position_color(
    &[ComponentKind::Position3, ComponentKind::Color],
    Some(DestinationVertexKind::PositionColor)
)]
#[case::position2_uv(
    &[ComponentKind::Position2, ComponentKind::Uv],
    Some(DestinationVertexKind::Position2Uv)
)]
#[case::extra_component(
    &[ComponentKind::Position3, ComponentKind::Normal, ComponentKind::Uv, ComponentKind::Color],
    None
)]
#[case::positions_only(&[ComponentKind::Position3], None)]
fn layout_selection(
    #[case] kinds: &[ComponentKind],
    #[case] expected: Option<DestinationVertexKind>,
) {
    let mut mesh = Mesh::new();
    for kind in kinds {
        mesh.add_component(*kind).unwrap();
    }
    mesh.set_vertex_count(3);
    mesh.add_face(&[0, 1, 2]).unwrap();

    match (mesh.get_mesh_data(0), expected) {
        (Ok(data), Some(kind)) => {
            assert_eq!(data.vertex_kind(), kind);
            assert_eq!(data.layout, VertexLayoutDefinition::from_components(kind.components()));
            assert_eq!(data.layout.stride() as usize * 3, data.vertex_bytes().len());
        }
        (Err(MeshError::IncompatibleVertexLayout(_)), None) => {}
        (result, expected) => panic!("expected {expected:?}, got {result:?}"),
    }
}

// ---------------------------------------------------------------------------
// Round trips and merging
// ---------------------------------------------------------------------------

#[test]
fn vertex_structs_round_trip_through_columns() {
    let source = create_cube(2.0);
    let vertices = source.to_array::<PositionNormalUv>().unwrap();
    let rebuilt = create_from_vertices(&vertices, source.indices(), FaceType::Quad).unwrap();

    assert_eq!(rebuilt.positions(), source.positions());
    assert_eq!(rebuilt.normals(), source.normals());
    assert_eq!(rebuilt.uvs(), source.uvs());
    assert_eq!(rebuilt.faces(), source.faces());

    let data = rebuilt.get_mesh_data(0).unwrap();
    assert_eq!(data.primitive_count(), 12);
    assert_eq!(data.vertex_count(), 36);
    assert!(data.index_buffer.iter().all(|&i| (i as usize) < data.vertex_count()));
    assert_eq!(data.vertex_bytes(), source.get_mesh_data(0).unwrap().vertex_bytes());
}

#[test]
fn merged_meshes_keep_both_materials() {
    let mut scene = Mesh::new();
    scene.add_components::<PositionNormalUv>().unwrap();
    scene.add_mesh(&create_cube(1.0), None, Some(1)).unwrap();
    scene.add_mesh(&create_quad(1.0, 1.0), None, Some(2)).unwrap();

    assert_eq!(scene.vertex_count(), 28);
    assert_eq!(scene.material_ids().iter().copied().collect::<Vec<_>>(), [1, 2]);

    let parts = scene.split_by_material().unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].1.face_count(), 6);
    assert_eq!(parts[1].1.face_count(), 1);
    assert_eq!(parts[1].1.vertex_count(), 4);
}

#[test]
fn clone_does_not_alias() {
    let original = create_quad(0.5, 0.5);
    let mut copy = original.clone();
    copy.translate([1.0, 2.0, 3.0]);
    copy.add_face(&[0, 1, 2]).unwrap();

    assert_eq!(original.positions().unwrap()[0], [-0.5, -0.5, 0.0]);
    assert_eq!(copy.positions().unwrap()[0], [0.5, 1.5, 3.0]);
    assert_eq!(original.face_count(), 1);
}

#[test]
fn expanded_sphere_has_one_vertex_per_corner() {
    let sphere = create_sphere(1.0, 8, 4);
    let corners: usize = sphere.faces().iter().map(|f| f.count).sum();
    let expanded = sphere.expanded().unwrap();
    assert_eq!(expanded.vertex_count(), corners);
    assert_eq!(expanded.face_count(), sphere.face_count());
    assert_eq!(expanded.expanded().unwrap(), expanded);
}

#[test]
fn smoothed_cube_lowers_with_normals() {
    let mut cube = create_cube(1.0);
    cube.recalculate_normals(100.0).unwrap();
    let data = cube.get_mesh_data(0).unwrap();
    let inv_sqrt3 = 1.0 / 3f32.sqrt();
    for vertex in data.vertex_buffer.as_position_normal_uv().unwrap() {
        for axis in 0..3 {
            assert!((vertex.normal[axis].abs() - inv_sqrt3).abs() < 1e-5);
            assert_eq!(vertex.normal[axis].signum(), vertex.position[axis].signum());
        }
    }
}

#[cfg(feature = "serde")]
#[test]
fn mesh_survives_ron_cache() {
    let sphere = create_sphere(1.0, 6, 3).with_label("cached");
    let text = ron::to_string(&sphere).unwrap();
    let restored: Mesh = ron::from_str(&text).unwrap();
    assert_eq!(restored, sphere);
    assert_eq!(restored.label(), Some("cached"));
}
