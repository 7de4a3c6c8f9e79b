use super::*;

#[test]
fn gradient_parameter_projects_onto_axis() {
    let g = LinearGradient {
        start: Point::new(0.0, 0.0),
        end: Point::new(0.0, 100.0),
        from: Color::rgb(0, 0, 0),
        to: Color::rgb(200, 100, 50),
    };
    assert_eq!(g.t_at(Point::new(40.0, 0.0)), 0.0);
    assert_eq!(g.t_at(Point::new(0.0, 50.0)), 0.5);
    assert_eq!(g.t_at(Point::new(0.0, 500.0)), 1.0);
    assert_eq!(g.color_at(0.5), Color::rgb(100, 50, 25));
}

#[test]
fn degenerate_gradient_uses_start_color() {
    let g = LinearGradient {
        start: Point::new(5.0, 5.0),
        end: Point::new(5.0, 5.0),
        from: Color::rgb(1, 2, 3),
        to: Color::rgb(9, 9, 9),
    };
    assert_eq!(g.color_at(g.t_at(Point::new(100.0, 100.0))), Color::rgb(1, 2, 3));
}

#[test]
fn font_builders() {
    let f = Font::bold(70.0).italic();
    assert!(f.bold && f.italic);
    assert_eq!(f.size_px, 70.0);
}

#[test]
fn circle_path_bounds() {
    use kurbo::Shape;
    let bb = circle(Point::new(10.0, 10.0), 5.0).bounding_box();
    assert!((bb.x0 - 5.0).abs() < 1e-6 && (bb.x1 - 15.0).abs() < 1e-6);
}
