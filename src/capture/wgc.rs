//! Primary-monitor capture using the Windows Graphics Capture API.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use image::{ImageBuffer, Rgba, RgbaImage};
use tracing::{debug, warn};

use windows::core::Interface;
use windows::Foundation::TypedEventHandler;
use windows::Graphics::Capture::{
    Direct3D11CaptureFramePool, GraphicsCaptureItem, GraphicsCaptureSession,
};
use windows::Graphics::DirectX::Direct3D11::IDirect3DDevice;
use windows::Graphics::DirectX::DirectXPixelFormat;
use windows::Win32::Foundation::{E_ACCESSDENIED, POINT};
use windows::Win32::Graphics::Direct3D::D3D_DRIVER_TYPE_HARDWARE;
use windows::Win32::Graphics::Direct3D11::{
    D3D11CreateDevice, ID3D11Device, ID3D11DeviceContext, ID3D11Resource, ID3D11Texture2D,
    D3D11_CPU_ACCESS_READ, D3D11_CREATE_DEVICE_BGRA_SUPPORT, D3D11_MAP_READ, D3D11_SDK_VERSION,
    D3D11_TEXTURE2D_DESC, D3D11_USAGE_STAGING,
};
use windows::Win32::Graphics::Gdi::{MonitorFromPoint, HMONITOR, MONITOR_DEFAULTTOPRIMARY};
use windows::Win32::System::WinRT::Direct3D11::{
    CreateDirect3D11DeviceFromDXGIDevice, IDirect3DDxgiInterfaceAccess,
};
use windows::Win32::System::WinRT::Graphics::Capture::IGraphicsCaptureItemInterop;

use super::stream::{DisplaySource, DisplayStream};
use crate::error::CaptureError;

impl From<windows::core::Error> for CaptureError {
    fn from(e: windows::core::Error) -> Self {
        if e.code() == E_ACCESSDENIED {
            CaptureError::Denied
        } else {
            CaptureError::Backend(e.to_string())
        }
    }
}

/// Opens capture streams on the primary monitor.
#[derive(Clone, Debug)]
pub struct GraphicsCaptureSource {
    frame_timeout: Duration,
}

impl GraphicsCaptureSource {
    pub fn new(frame_timeout: Duration) -> Self {
        Self { frame_timeout }
    }
}

/// A running capture session plus the device needed to read frames back.
pub struct GraphicsCaptureStream {
    device: ID3D11Device,
    context: ID3D11DeviceContext,
    frame_pool: Direct3D11CaptureFramePool,
    session: GraphicsCaptureSession,
    frame_arrived: Arc<AtomicBool>,
    frame_timeout: Duration,
}

impl DisplaySource for GraphicsCaptureSource {
    type Stream = GraphicsCaptureStream;

    fn open(&self) -> Result<GraphicsCaptureStream, CaptureError> {
        if !GraphicsCaptureSession::IsSupported()? {
            return Err(CaptureError::Denied);
        }

        let (device, context) = create_d3d11_device()?;
        let item = create_capture_item(primary_monitor())?;
        let size = item.Size()?;
        debug!("Capture size: {}x{}", size.Width, size.Height);

        let d3d_device = create_direct3d_device(&device)?;
        let frame_pool = Direct3D11CaptureFramePool::CreateFreeThreaded(
            &d3d_device,
            DirectXPixelFormat::B8G8R8A8UIntNormalized,
            1,
            size,
        )?;
        let session = frame_pool.CreateCaptureSession(&item)?;

        let frame_arrived = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&frame_arrived);
        frame_pool.FrameArrived(&TypedEventHandler::new(
            move |_pool: &Option<Direct3D11CaptureFramePool>, _| {
                flag.store(true, Ordering::SeqCst);
                Ok(())
            },
        ))?;

        session.StartCapture()?;
        debug!("Capture session started");

        Ok(GraphicsCaptureStream {
            device,
            context,
            frame_pool,
            session,
            frame_arrived,
            frame_timeout: self.frame_timeout,
        })
    }
}

impl DisplayStream for GraphicsCaptureStream {
    fn next_frame(&mut self) -> Result<RgbaImage, CaptureError> {
        let start = Instant::now();
        while !self.frame_arrived.load(Ordering::SeqCst) {
            if start.elapsed() > self.frame_timeout {
                return Err(CaptureError::Timeout(self.frame_timeout));
            }
            std::thread::sleep(Duration::from_millis(10));
        }

        let frame = self.frame_pool.TryGetNextFrame()?;
        let access: IDirect3DDxgiInterfaceAccess = frame.Surface()?.cast()?;
        let texture: ID3D11Texture2D = unsafe { access.GetInterface()? };
        self.read_texture(&texture)
    }

    fn stop(&mut self) {
        if let Err(e) = self.session.Close() {
            warn!("Failed to close capture session: {}", e);
        }
        if let Err(e) = self.frame_pool.Close() {
            warn!("Failed to close frame pool: {}", e);
        }
    }
}

impl GraphicsCaptureStream {
    /// Copies a GPU texture into a staging texture and reads it as RGBA.
    fn read_texture(&self, texture: &ID3D11Texture2D) -> Result<RgbaImage, CaptureError> {
        let mut desc = D3D11_TEXTURE2D_DESC::default();
        unsafe { texture.GetDesc(&mut desc) };

        let staging_desc = D3D11_TEXTURE2D_DESC {
            Width: desc.Width,
            Height: desc.Height,
            MipLevels: 1,
            ArraySize: 1,
            Format: desc.Format,
            SampleDesc: desc.SampleDesc,
            Usage: D3D11_USAGE_STAGING,
            BindFlags: Default::default(),
            CPUAccessFlags: D3D11_CPU_ACCESS_READ.0 as u32,
            MiscFlags: Default::default(),
        };

        let staging = unsafe {
            let mut staging: Option<ID3D11Texture2D> = None;
            self.device
                .CreateTexture2D(&staging_desc, None, Some(&mut staging))?;
            staging.ok_or_else(|| CaptureError::Backend("no staging texture".into()))?
        };
        let staging_resource: ID3D11Resource = staging.cast()?;

        unsafe {
            self.context
                .CopyResource(&staging_resource, &texture.cast::<ID3D11Resource>()?);
        }

        let mapped = unsafe {
            let mut mapped = Default::default();
            self.context
                .Map(&staging_resource, 0, D3D11_MAP_READ, 0, Some(&mut mapped))?;
            mapped
        };

        let row_pitch = mapped.RowPitch as usize;
        let src = unsafe {
            std::slice::from_raw_parts(mapped.pData as *const u8, row_pitch * desc.Height as usize)
        };

        // BGRA -> RGBA
        let image: RgbaImage = ImageBuffer::from_fn(desc.Width, desc.Height, |x, y| {
            let offset = y as usize * row_pitch + x as usize * 4;
            Rgba([src[offset + 2], src[offset + 1], src[offset], src[offset + 3]])
        });

        unsafe { self.context.Unmap(&staging_resource, 0) };

        Ok(image)
    }
}

fn primary_monitor() -> HMONITOR {
    unsafe { MonitorFromPoint(POINT { x: 0, y: 0 }, MONITOR_DEFAULTTOPRIMARY) }
}

fn create_d3d11_device() -> Result<(ID3D11Device, ID3D11DeviceContext), CaptureError> {
    let mut device: Option<ID3D11Device> = None;
    let mut context: Option<ID3D11DeviceContext> = None;

    unsafe {
        D3D11CreateDevice(
            None,
            D3D_DRIVER_TYPE_HARDWARE,
            None,
            D3D11_CREATE_DEVICE_BGRA_SUPPORT,
            None,
            D3D11_SDK_VERSION,
            Some(&mut device),
            None,
            Some(&mut context),
        )?;
    }

    match (device, context) {
        (Some(device), Some(context)) => Ok((device, context)),
        _ => Err(CaptureError::Backend("failed to create D3D11 device".into())),
    }
}

fn create_direct3d_device(device: &ID3D11Device) -> Result<IDirect3DDevice, CaptureError> {
    let dxgi_device: windows::Win32::Graphics::Dxgi::IDXGIDevice = device.cast()?;
    let inspectable = unsafe { CreateDirect3D11DeviceFromDXGIDevice(&dxgi_device)? };
    Ok(inspectable.cast()?)
}

fn create_capture_item(monitor: HMONITOR) -> Result<GraphicsCaptureItem, CaptureError> {
    let class_name = windows::core::h!("Windows.Graphics.Capture.GraphicsCaptureItem");
    let interop: IGraphicsCaptureItemInterop =
        unsafe { windows::Win32::System::WinRT::RoGetActivationFactory(class_name)? };
    debug!("Creating capture item for monitor {:?}", monitor);
    Ok(unsafe { interop.CreateForMonitor(monitor)? })
}
