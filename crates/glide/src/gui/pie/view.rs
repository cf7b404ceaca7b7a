use super::{ICON_INACTIVE_ALPHA, ICON_SIZE};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use knob::controller::LabelDisplay;
use knob::cursor::Point;
use knob::pie::{Label, LabelError, PieMenu, PieStyle};
use palette::Srgba;
use std::f64::consts::PI;
use std::iter::zip;

/// Paints one label: a disc with either text or an icon on it.
pub enum LabelPainter {
    Text(String),
    Image(Pixbuf),
}

impl LabelPainter {
    /// Fails for a label with nothing to show. An icon that cannot be loaded falls back to text.
    pub fn new(label: &Label) -> Result<Self, LabelError> {
        Ok(match label.display()? {
            LabelDisplay::Text(text) => Self::Text(text.clone()),
            LabelDisplay::Image(path) => {
                match Pixbuf::from_file_at_scale(path, ICON_SIZE, ICON_SIZE, true) {
                    Ok(pixbuf) => Self::Image(pixbuf),
                    Err(e) => {
                        log::warn!("Failed to load icon {}: {}", path.display(), e);
                        Self::Text(label.value.to_string())
                    }
                }
            }
        })
    }

    fn paint(
        &self,
        cr: &Context,
        center: Point,
        style: &PieStyle,
        active: bool,
        colors: &ThemeColors,
    ) -> Result<(), cairo::Error> {
        set_color(cr, colors.icon);
        cr.arc(center.x, center.y, style.icon_radius, 0.0, 2.0 * PI);
        cr.fill()?;

        match self {
            Self::Text(text) => Self::paint_text(cr, center, style, text, colors)?,
            Self::Image(pixbuf) => Self::paint_image(cr, center, style, pixbuf, active)?,
        }

        ring(
            cr,
            center,
            style.icon_radius,
            style.border_thickness,
            colors.border,
        )
    }

    fn paint_text(
        cr: &Context,
        center: Point,
        style: &PieStyle,
        text: &str,
        colors: &ThemeColors,
    ) -> Result<(), cairo::Error> {
        set_color(cr, colors.text);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(style.icon_radius * 0.45);
        let ext = cr.text_extents(text)?;
        cr.move_to(
            center.x - ext.width() / 2.0 - ext.x_bearing(),
            center.y - ext.height() / 2.0 - ext.y_bearing(),
        );
        cr.show_text(text)
    }

    fn paint_image(
        cr: &Context,
        center: Point,
        style: &PieStyle,
        pixbuf: &Pixbuf,
        active: bool,
    ) -> Result<(), cairo::Error> {
        let size = style.icon_radius * 1.8;
        let icon_scale = size / f64::from(pixbuf.width().max(pixbuf.height()));

        cr.save()?;
        cr.arc(center.x, center.y, size / 2.0, 0.0, 2.0 * PI);
        cr.clip();
        cr.translate(
            center.x - f64::from(pixbuf.width()) * icon_scale / 2.0,
            center.y - f64::from(pixbuf.height()) * icon_scale / 2.0,
        );
        cr.scale(icon_scale, icon_scale);

        if active {
            cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
            cr.paint()?;
        } else {
            cr.push_group();
            cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
            cr.paint()?;
            cr.pop_group_to_source()?;
            cr.paint_with_alpha(ICON_INACTIVE_ALPHA)?;
        }
        cr.restore()
    }
}

/// Paints an open pie menu. `painters` are in the same order as `menu.labels()`.
pub fn draw(
    cr: &Context,
    menu: &PieMenu,
    painters: &[LabelPainter],
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let style = menu.style();
    let origin = Point::default();
    let center = menu.center();

    cr.save()?;
    cr.translate(center.x, center.y);
    cr.scale(menu.scale(), menu.scale());

    draw_deadzone_indicator(cr, style, colors)?;
    ring(
        cr,
        origin,
        style.outer_radius(),
        style.area_thickness,
        colors.background,
    )?;
    if let Some(active) = menu.active() {
        draw_active_pie(cr, style, active.angle, menu.labels().len(), colors)?;
    }
    ring(
        cr,
        origin,
        style.outer_radius() - style.area_thickness,
        style.border_thickness,
        colors.border,
    )?;

    // label centers are relative to the top-left corner of the widget square
    cr.translate(-style.widget_radius(), -style.widget_radius());
    let active = menu.active().map(|label| label.angle);
    for (label, painter) in zip(menu.labels().iter(), painters) {
        painter.paint(cr, label.center, style, active == Some(label.angle), colors)?;
    }

    cr.restore()
}

fn draw_deadzone_indicator(
    cr: &Context,
    style: &PieStyle,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let origin = Point::default();
    ring(cr, origin, style.deadzone_radius, 1.0, colors.deadzone_outer)?;
    ring(cr, origin, style.deadzone_radius - 1.0, 1.0, colors.deadzone_inner)
}

fn draw_active_pie(
    cr: &Context,
    style: &PieStyle,
    angle: u16,
    count: usize,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let span = 360.0 / count as f64;
    let angle = f64::from(angle);
    set_color(cr, colors.active);
    cr.set_line_width(style.area_thickness);
    cr.arc(
        0.0,
        0.0,
        style.outer_radius() - style.area_thickness / 2.0,
        cairo_angle(angle - span / 2.0),
        cairo_angle(angle + span / 2.0),
    );
    cr.stroke()
}

/// Converts degrees clockwise from the top into cairo radians.
fn cairo_angle(degrees: f64) -> f64 {
    (degrees - 90.0).to_radians()
}

/// Stroked circle whose outer edge lies at `outer_radius`.
fn ring(
    cr: &Context,
    center: Point,
    outer_radius: f64,
    thickness: f64,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    set_color(cr, color);
    cr.set_line_width(thickness);
    cr.new_sub_path();
    cr.arc(
        center.x,
        center.y,
        (outer_radius - thickness / 2.0).max(0.0),
        0.0,
        2.0 * PI,
    );
    cr.stroke()
}

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}
