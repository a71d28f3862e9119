use crate::Message;
use iced::{
    mouse,
    widget::canvas::{self, Frame, Geometry, Path, Stroke},
    Color, Point, Rectangle, Renderer, Theme,
};
use trackcore::{AircraftRecord, OriginLocation};

const KM_PER_DEGREE: f64 = 111.32;
const MARKER_SIZE: f32 = 9.0;

/// Top-down plot of the tracked area with one marker per aircraft.
#[derive(Clone)]
pub struct AircraftMap {
    aircraft: Vec<AircraftRecord>,
    origin: OriginLocation,
    selected: Option<String>,
    show_info: bool,
}

impl AircraftMap {
    pub fn new(
        aircraft: Vec<AircraftRecord>,
        origin: OriginLocation,
        selected: Option<&AircraftRecord>,
        show_info: bool,
    ) -> Self {
        Self {
            aircraft,
            origin,
            selected: selected.map(|aircraft| aircraft.id.clone()),
            show_info,
        }
    }

    /// Centre of the plot: the followed aircraft when there is one.
    fn centre(&self) -> (f64, f64) {
        self.selected
            .as_ref()
            .and_then(|id| self.aircraft.iter().find(|aircraft| &aircraft.id == id))
            .map(|aircraft| (aircraft.latitude, aircraft.longitude))
            .unwrap_or((self.origin.latitude, self.origin.longitude))
    }
}

/// Equirectangular offset from `centre` in kilometers (east, north).
pub fn project_km(centre: (f64, f64), latitude: f64, longitude: f64) -> (f64, f64) {
    let east = (longitude - centre.1) * KM_PER_DEGREE * centre.0.to_radians().cos();
    let north = (latitude - centre.0) * KM_PER_DEGREE;
    (east, north)
}

/// Low altitudes render warm, cruise altitudes cool.
pub fn altitude_color(altitude_ft: i32) -> Color {
    let t = (altitude_ft.clamp(0, 40_000) as f32) / 40_000.0;
    Color::from_rgb(0.95 - 0.75 * t, 0.45 + 0.25 * t, 0.2 + 0.75 * t)
}

fn heading_marker(centre: Point, track_deg: f64) -> Path {
    let heading = track_deg.to_radians() as f32;
    let rotate = |dx: f32, dy: f32| {
        let (sin, cos) = heading.sin_cos();
        Point::new(centre.x + dx * cos - dy * sin, centre.y + dx * sin + dy * cos)
    };
    Path::new(|builder| {
        builder.move_to(rotate(0.0, -MARKER_SIZE));
        builder.line_to(rotate(MARKER_SIZE * 0.6, MARKER_SIZE * 0.7));
        builder.line_to(rotate(0.0, MARKER_SIZE * 0.3));
        builder.line_to(rotate(-MARKER_SIZE * 0.6, MARKER_SIZE * 0.7));
        builder.close();
    })
}

impl canvas::Program<Message> for AircraftMap {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.03, 0.05, 0.08),
        );

        let middle = Point::new(bounds.width / 2.0, bounds.height / 2.0);
        let radius_px = bounds.width.min(bounds.height) / 2.0 - 12.0;
        let scale = radius_px as f64 / self.origin.radius_km.max(1.0);
        let centre = self.centre();

        let (ring_east, ring_north) =
            project_km(centre, self.origin.latitude, self.origin.longitude);
        let ring_centre = Point::new(
            middle.x + (ring_east * scale) as f32,
            middle.y - (ring_north * scale) as f32,
        );
        for ring in 1..=3 {
            let ring_radius = radius_px * (ring as f32 / 3.0);
            let ring_path = Path::new(|builder| builder.circle(ring_centre, ring_radius));
            frame.stroke(
                &ring_path,
                Stroke::default().with_color(Color::from_rgb(0.2, 0.25, 0.3)),
            );
        }

        for aircraft in &self.aircraft {
            let (east, north) = project_km(centre, aircraft.latitude, aircraft.longitude);
            let position = Point::new(
                middle.x + (east * scale) as f32,
                middle.y - (north * scale) as f32,
            );
            if position.x < 0.0
                || position.y < 0.0
                || position.x > bounds.width
                || position.y > bounds.height
            {
                continue;
            }

            let is_selected = self.selected.as_deref() == Some(aircraft.id.as_str());
            let marker = heading_marker(position, aircraft.track_deg);
            frame.fill(&marker, altitude_color(aircraft.altitude_ft));
            if is_selected {
                let halo = Path::new(|builder| builder.circle(position, MARKER_SIZE * 1.8));
                frame.stroke(
                    &halo,
                    Stroke::default()
                        .with_width(2.0)
                        .with_color(Color::from_rgb(1.0, 0.85, 0.2)),
                );
            }

            if self.show_info || is_selected {
                frame.fill_text(canvas::Text {
                    content: format!(
                        "{}\n{} ft  {:.0} kt  {:.0}°",
                        aircraft.callsign(),
                        aircraft.altitude_ft,
                        aircraft.ground_speed_kt,
                        aircraft.track_deg
                    ),
                    position: Point::new(position.x + 12.0, position.y - 10.0),
                    color: Color::from_rgb(0.85, 0.88, 0.92),
                    size: 11.0.into(),
                    ..canvas::Text::default()
                });
            }
        }

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_is_zero_at_centre() {
        assert_eq!(project_km((13.7, 100.76), 13.7, 100.76), (0.0, 0.0));
    }

    #[test]
    fn one_degree_north_is_about_111_km() {
        let (east, north) = project_km((13.7, 100.76), 14.7, 100.76);
        assert!(east.abs() < 1e-9);
        assert!((north - KM_PER_DEGREE).abs() < 1e-9);
    }

    #[test]
    fn altitude_color_shifts_with_height() {
        let low = altitude_color(0);
        let high = altitude_color(40_000);
        assert!(low.r > high.r);
        assert!(low.b < high.b);
        assert_eq!(altitude_color(90_000), high);
    }
}
