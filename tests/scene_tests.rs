use approx::assert_abs_diff_eq;
use capsule_bvh::*;

fn quad_geometry() -> Geometry {
    // Unit quad on y = 0 with upward normals.
    Geometry::indexed(
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
        ],
        vec![0, 2, 1, 1, 2, 3],
    )
}

#[test]
fn test_indexed_geometry_expands_to_triangles() {
    let tris = quad_geometry().triangles(&Mat4::IDENTITY).unwrap();
    assert_eq!(tris.len(), 2);
    assert!(tris.iter().all(|t| t.normal().y > 0.99));
}

#[test]
fn test_nested_transforms_compose_parent_first() {
    let root = SceneNode::group(Transform::from_position(Vec3::new(0.0, 5.0, 0.0))).with_child(
        SceneNode::mesh(
            Transform::from_position(Vec3::new(2.0, 0.0, 0.0)),
            quad_geometry(),
            Layers::default(),
        ),
    );

    let tris = collect_triangles(&root, &Layers::default()).unwrap();
    assert_eq!(tris.len(), 2);
    assert_eq!(tris[0].a, Vec3::new(2.0, 5.0, 0.0));
}

#[test]
fn test_scaled_parent_scales_child_geometry() {
    let parent = Transform {
        scale: Vec3::splat(2.0),
        ..Transform::default()
    };
    let root = SceneNode::group(parent).with_child(SceneNode::mesh(
        Transform::default(),
        quad_geometry(),
        Layers::default(),
    ));

    let bvh = Bvh::from_scene(&root, &Layers::default(), BvhConfig::default()).unwrap();
    assert_eq!(bvh.bounds().max, Vec3::new(2.0, 0.0, 2.0));
}

#[test]
fn test_layer_filter_skips_hidden_meshes() {
    let root = SceneNode::default()
        .with_child(SceneNode::mesh(
            Transform::default(),
            quad_geometry(),
            Layers::only(0),
        ))
        .with_child(SceneNode::mesh(
            Transform::from_position(Vec3::new(10.0, 0.0, 0.0)),
            quad_geometry(),
            Layers::only(3),
        ));

    let walkable = Bvh::from_scene(&root, &Layers::only(0), BvhConfig::default()).unwrap();
    assert_eq!(walkable.triangles().len(), 2);
    assert!(walkable.bounds().max.x <= 1.0);

    let everything = Bvh::from_scene(&root, &Layers::ALL, BvhConfig::default()).unwrap();
    assert_eq!(everything.triangles().len(), 4);

    let none = Bvh::from_scene(&root, &Layers::NONE, BvhConfig::default()).unwrap();
    assert!(none.is_empty());
}

#[test]
fn test_capsule_collides_with_transformed_scene_mesh() {
    let root = SceneNode::mesh(
        Transform::from_position(Vec3::new(0.0, 1.0, 0.0)),
        quad_geometry(),
        Layers::default(),
    );
    let bvh = Bvh::from_scene(&root, &Layers::default(), BvhConfig::default()).unwrap();

    let capsule = Capsule::new(Vec3::new(0.3, 1.1, 0.3), Vec3::new(0.3, 2.1, 0.3), 0.25);
    let res = bvh.capsule_intersect(&capsule).expect("capsule rests on the raised quad");
    assert_abs_diff_eq!(res.normal.y, 1.0, epsilon = 1e-5);
    assert!(res.depth > 0.1);
}

#[test]
fn test_malformed_geometry_surfaces_errors() {
    let root = SceneNode::mesh(
        Transform::default(),
        Geometry::new(vec![Vec3::ZERO, Vec3::X]),
        Layers::default(),
    );
    let err = Bvh::from_scene(&root, &Layers::default(), BvhConfig::default()).unwrap_err();
    assert_eq!(err, BvhError::IncompleteTriangle { len: 2 });

    let root = SceneNode::mesh(
        Transform::default(),
        Geometry::indexed(vec![Vec3::ZERO], vec![0, 0, 7]),
        Layers::default(),
    );
    let err = Bvh::from_scene(&root, &Layers::default(), BvhConfig::default()).unwrap_err();
    assert_eq!(
        err,
        BvhError::IndexOutOfRange {
            index: 7,
            vertex_count: 1
        }
    );
    assert!(err.to_string().contains("out of range"));
}
