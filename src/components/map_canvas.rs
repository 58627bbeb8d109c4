use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, CanvasWindingRule, HtmlCanvasElement, MouseEvent, WheelEvent};
use yew::prelude::*;

use super::camera_controls::CameraControls;
use crate::dispatch::{Interaction, PointerEvent};
use crate::geo::{Margins, Projection};
use crate::map::RenderedMap;
use crate::state::{Camera, ZoomExtent};
use crate::util::cwarn;

/// Shared map handle; compared by pointer so props stay cheap.
#[derive(Clone, Debug)]
pub struct SharedMap(pub Rc<RenderedMap>);

impl PartialEq for SharedMap {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct MapCanvasProps {
    pub map: SharedMap,
    pub hovered: Option<String>,
    pub zoom: ZoomExtent,
    pub margins: Margins,
    pub on_interaction: Callback<Interaction>,
    pub on_resize: Callback<(f64, f64)>,
}

fn fit_canvas(canvas: &HtmlCanvasElement, margins: Margins) -> (f64, f64) {
    let (win_w, win_h) = web_sys::window()
        .map(|w| {
            (
                w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0),
                w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0),
            )
        })
        .unwrap_or((800.0, 600.0));
    let (w, h) = margins.inner_size(win_w, win_h);
    canvas.set_width(w as u32);
    canvas.set_height(h as u32);
    (w, h)
}

fn projection_for(canvas: &HtmlCanvasElement) -> Projection {
    Projection::fit(canvas.width() as f64, canvas.height() as f64)
}

fn pointer_event(
    e: &MouseEvent,
    canvas: &HtmlCanvasElement,
    map: &SharedMap,
    camera: &Camera,
) -> PointerEvent {
    let at = (e.offset_x() as f64, e.offset_y() as f64);
    PointerEvent {
        x: e.page_x() as f64,
        y: e.page_y() as f64,
        target_id: map
            .0
            .country_at(at, &projection_for(canvas), camera)
            .map(|c| c.id.clone()),
    }
}

#[function_component(MapCanvas)]
pub fn map_canvas(props: &MapCanvasProps) -> Html {
    let canvas_ref = use_node_ref();
    let camera = use_mut_ref(Camera::default);
    let draw_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>);
    let map_ref = use_mut_ref(|| props.map.clone());
    let hovered_ref = use_mut_ref(|| props.hovered.clone());
    let interaction_ref = use_mut_ref(|| props.on_interaction.clone());
    *interaction_ref.borrow_mut() = props.on_interaction.clone();

    // Effect: latest map / hover, then redraw
    {
        let map_ref = map_ref.clone();
        let hovered_ref = hovered_ref.clone();
        let draw_ref = draw_ref.clone();
        use_effect_with(
            (props.map.clone(), props.hovered.clone()),
            move |(map, hovered)| {
                *map_ref.borrow_mut() = map.clone();
                *hovered_ref.borrow_mut() = hovered.clone();
                if let Some(f) = &*draw_ref.borrow() {
                    f();
                }
                || ()
            },
        );
    }

    // Main mount effect (drawing, pointer events, resize)
    {
        let canvas_ref = canvas_ref.clone();
        let camera = camera.clone();
        let draw_ref_setup = draw_ref.clone();
        let zoom_extent = props.zoom;
        let margins = props.margins;
        let on_resize = props.on_resize.clone();

        use_effect_with((), move |_| {
            let window = web_sys::window();
            let canvas = canvas_ref.cast::<HtmlCanvasElement>();
            let (Some(window), Some(canvas)) = (window, canvas) else {
                cwarn("map canvas could not be mounted");
                return Box::new(|| ()) as Box<dyn FnOnce()>;
            };
            on_resize.emit(fit_canvas(&canvas, margins));

            let draw_closure: Rc<dyn Fn()> = {
                let canvas = canvas.clone();
                let camera = camera.clone();
                let map_ref = map_ref.clone();
                let hovered_ref = hovered_ref.clone();
                Rc::new(move || {
                    if !canvas.is_connected() {
                        return;
                    }
                    let Some(ctx) = canvas
                        .get_context("2d")
                        .ok()
                        .flatten()
                        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
                    else {
                        return;
                    };
                    let w = canvas.width() as f64;
                    let h = canvas.height() as f64;
                    let projection = Projection::fit(w, h);
                    let cam = camera.borrow();
                    let map = map_ref.borrow();
                    let hovered = hovered_ref.borrow();

                    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
                    ctx.clear_rect(0.0, 0.0, w, h);
                    ctx.set_transform(cam.zoom, 0.0, 0.0, cam.zoom, cam.offset_x, cam.offset_y)
                        .ok();
                    ctx.set_stroke_style_str("#000000");
                    for country in &map.0.countries {
                        let hot = hovered.as_deref() == Some(country.id.as_str());
                        ctx.begin_path();
                        for ring in &country.rings {
                            for (i, &ll) in ring.iter().enumerate() {
                                let (x, y) = projection.project(ll);
                                if i == 0 {
                                    ctx.move_to(x, y);
                                } else {
                                    ctx.line_to(x, y);
                                }
                            }
                            ctx.close_path();
                        }
                        ctx.set_fill_style_str(if hot { "#000000" } else { "white" });
                        ctx.fill_with_canvas_winding_rule(CanvasWindingRule::Evenodd);
                        // Stroke widths stay constant on screen while zoomed.
                        let width = if hot { 2.0 } else { 1.0 };
                        ctx.set_line_width(width / cam.zoom);
                        ctx.stroke();
                    }
                })
            };
            *draw_ref_setup.borrow_mut() = Some(draw_closure.clone());
            draw_closure();

            let redraw = {
                let draw_ref = draw_ref_setup.clone();
                move || {
                    if let Some(f) = &*draw_ref.borrow() {
                        f();
                    }
                }
            };

            // Wheel zoom, anchored at the pointer
            let wheel_cb = {
                let camera = camera.clone();
                let redraw = redraw.clone();
                Closure::wrap(Box::new(move |e: WheelEvent| {
                    e.prevent_default();
                    camera.borrow_mut().zoom_at(
                        e.offset_x() as f64,
                        e.offset_y() as f64,
                        Camera::wheel_factor(e.delta_y()),
                        zoom_extent,
                    );
                    redraw();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref())
                .ok();

            let mousedown_cb = {
                let camera = camera.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    if e.button() == 0 {
                        camera
                            .borrow_mut()
                            .begin_drag(e.client_x() as f64, e.client_y() as f64);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                )
                .ok();

            let mousemove_cb = {
                let camera = camera.clone();
                let canvas_ev = canvas.clone();
                let map_ref = map_ref.clone();
                let interaction_ref = interaction_ref.clone();
                let redraw = redraw.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    let mut cam = camera.borrow_mut();
                    if cam.drag_to(e.client_x() as f64, e.client_y() as f64) {
                        drop(cam);
                        redraw();
                        return;
                    }
                    let ev = pointer_event(&e, &canvas_ev, &map_ref.borrow(), &cam);
                    drop(cam);
                    let cb = interaction_ref.borrow().clone();
                    cb.emit(Interaction::Hover(ev));
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                )
                .ok();

            // A press that barely moved is a click on whatever is under it.
            let mouseup_cb = {
                let camera = camera.clone();
                let canvas_ev = canvas.clone();
                let map_ref = map_ref.clone();
                let interaction_ref = interaction_ref.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    let mut cam = camera.borrow_mut();
                    if !cam.end_drag() {
                        return;
                    }
                    let ev = pointer_event(&e, &canvas_ev, &map_ref.borrow(), &cam);
                    drop(cam);
                    let cb = interaction_ref.borrow().clone();
                    cb.emit(Interaction::Click(ev));
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref())
                .ok();

            let window_mouseup_cb = {
                let camera = camera.clone();
                Closure::wrap(Box::new(move |_e: MouseEvent| {
                    camera.borrow_mut().end_drag();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback(
                    "mouseup",
                    window_mouseup_cb.as_ref().unchecked_ref(),
                )
                .ok();

            let mouseleave_cb = {
                let interaction_ref = interaction_ref.clone();
                Closure::wrap(Box::new(move |_e: MouseEvent| {
                    let cb = interaction_ref.borrow().clone();
                    cb.emit(Interaction::HoverOut);
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "mouseleave",
                    mouseleave_cb.as_ref().unchecked_ref(),
                )
                .ok();

            let resize_cb = {
                let canvas = canvas.clone();
                let redraw = redraw.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    on_resize.emit(fit_canvas(&canvas, margins));
                    redraw();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .ok();

            // Cleanup
            Box::new(move || {
                let _ = canvas.remove_event_listener_with_callback(
                    "wheel",
                    wheel_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "mouseup",
                    mouseup_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "mouseleave",
                    mouseleave_cb.as_ref().unchecked_ref(),
                );
                let _ = window.remove_event_listener_with_callback(
                    "mouseup",
                    window_mouseup_cb.as_ref().unchecked_ref(),
                );
                let _ = window.remove_event_listener_with_callback(
                    "resize",
                    resize_cb.as_ref().unchecked_ref(),
                );
            }) as Box<dyn FnOnce()>
        });
    }

    let zoom_by = |factor: f64| -> Callback<()> {
        let camera = camera.clone();
        let canvas_ref = canvas_ref.clone();
        let draw_ref = draw_ref.clone();
        let extent = props.zoom;
        Callback::from(move |_| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                let cx = canvas.width() as f64 / 2.0;
                let cy = canvas.height() as f64 / 2.0;
                camera.borrow_mut().zoom_at(cx, cy, factor, extent);
            }
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
        })
    };
    let reset_cb = {
        let camera = camera.clone();
        let draw_ref = draw_ref.clone();
        Callback::from(move |_| {
            camera.borrow_mut().reset();
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
        })
    };

    let zoom_in_cb = zoom_by(1.5);
    let zoom_out_cb = zoom_by(1.0 / 1.5);
    let m = props.margins;
    html! {
        <>
            <canvas
                ref={canvas_ref.clone()}
                style={format!("position:absolute; left:{}px; top:{}px; cursor:pointer;", m.left, m.top)}
            />
            <CameraControls on_zoom_in={zoom_in_cb} on_zoom_out={zoom_out_cb} on_reset={reset_cb} />
        </>
    }
}
