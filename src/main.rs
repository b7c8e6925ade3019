use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use paddletopia::assets::SceneAssets;
use paddletopia::cli::Cli;
use paddletopia::config::SceneProfile;
use paddletopia::frame::FrameClock;
use paddletopia::overlay::Overlay;
use paddletopia::renderer::SceneRenderer;
use paddletopia::scene::PaddleScene;

const INITIAL_WINDOW_WIDTH: u32 = 1280;
const INITIAL_WINDOW_HEIGHT: u32 = 720;

struct App {
    profile: SceneProfile,
    assets: SceneAssets,
    overlay: Overlay,
    window: Option<Arc<Window>>,
    renderer: Option<SceneRenderer>,
    scene: Option<PaddleScene>,
    clock: FrameClock,
}

impl App {
    fn new(profile: SceneProfile, assets: SceneAssets, overlay: Overlay) -> Self {
        Self {
            profile,
            assets,
            overlay,
            window: None,
            renderer: None,
            scene: None,
            clock: FrameClock::new(),
        }
    }

    fn redraw(&mut self) {
        let frame = self.clock.tick();
        let (Some(window), Some(renderer), Some(scene)) = (&self.window, &mut self.renderer, &mut self.scene) else {
            return;
        };

        scene.update(frame.delta);

        match renderer.render(window, scene, frame.time) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => renderer.reconfigure(),
            Err(wgpu::SurfaceError::Timeout) => log::warn!("Surface timeout, skipping frame {}", frame.number),
            Err(e) => log::error!("Render error: {}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("Paddletopia")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    INITIAL_WINDOW_WIDTH,
                    INITIAL_WINDOW_HEIGHT,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(SceneRenderer::new(
            window.clone(),
            &self.assets,
            &self.profile,
            self.overlay,
        )) {
            Ok(r) => r,
            Err(e) => {
                log::error!("Failed to initialize renderer: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        self.scene = Some(PaddleScene::new(&self.profile, self.assets.paddle_bounds()));
        self.clock = FrameClock::new();
        self.window = Some(window);
        self.renderer = Some(renderer);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        // Let egui handle the event first
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.handle_event(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            other => {
                if let Some(scene) = &mut self.scene {
                    scene.camera.process_event(&other);
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(scene) = &mut self.scene {
            scene.teardown();
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let profile = cli.load_profile()?;

    if cli.dump_profile {
        print!("{}", profile.to_toml()?);
        return Ok(());
    }

    let assets = SceneAssets::load(&cli.model, &cli.texture);
    let event_loop = EventLoop::new()?;
    let mut app = App::new(profile, assets, Overlay::new(!cli.no_ui));

    log::info!("Paddletopia - left drag orbits, right drag pans, scroll zooms, Escape quits");
    event_loop.run_app(&mut app)?;

    Ok(())
}
