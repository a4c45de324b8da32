/// D3D11Device - Direct3D 11 implementation of the Device trait
///
/// Owns the `ID3D11Device` and, under the debug layer, its info queue.
/// `create_graphics_device` is the backend entry point.

use std::ffi::CString;
use std::rc::Rc;

use dx11_lessons::dx11::device::{
    BlendDesc, BlendState, Buffer, BufferDesc, DepthStencilDesc, DepthStencilState,
    DepthStencilView, Device, DisplayMode, Format, InputElementDesc, InputLayout, PixelShader,
    PresentSurface, RasterizerDesc, RasterizerState, RenderTargetView, SamplerDesc, SamplerState,
    ShaderResourceView, SrvDimension, SubresourceData, SwapChainDesc, SwapChainFlags, Texture,
    TextureDesc, VertexShader,
};
use dx11_lessons::dx11::render::GraphicsDevice;
use dx11_lessons::dx11::{DeviceConfig, Error, Result};
use dx11_lessons::{dx_debug, dx_error, dx_info};
use raw_window_handle::RawWindowHandle;
use windows::core::{Interface, PCSTR};
use windows::Win32::Foundation::{BOOL, HMODULE, HWND};
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D11::*;
use windows::Win32::Graphics::Dxgi::Common::*;
use windows::Win32::Graphics::Dxgi::*;

use crate::d3d11_context::D3D11Context;
use crate::d3d11_convert::{
    blend_desc_to_d3d11, buffer_desc_to_d3d11, classification_to_d3d11, created,
    depth_stencil_desc_to_d3d11, format_to_dxgi, native_error, rasterizer_desc_to_d3d11,
    rational_from_dxgi, rational_to_dxgi, sample_desc_to_dxgi, sampler_desc_to_d3d11,
    swap_effect_to_dxgi, texture_desc_to_d3d11,
};
use crate::d3d11_debug::drain_info_queue;
use crate::d3d11_present_surface::D3D11SwapChain;
use crate::d3d11_resources::{
    D3D11BlendState, D3D11Buffer, D3D11DepthStencilState, D3D11DepthStencilView,
    D3D11InputLayout, D3D11PixelShader, D3D11RasterizerState, D3D11RenderTargetView,
    D3D11SamplerState, D3D11ShaderResourceView, D3D11Texture, D3D11VertexShader,
};

const SOURCE: &str = "dx11::d3d11::Device";

/// Create the device, its immediate context and wrap them
///
/// Hardware driver, feature level 11_1, BGRA support (for 2D overlays) and
/// the debug layer when `config.enable_debug_layer` is set.
///
/// # Example
///
/// ```no_run
/// use dx11_lessons::dx11::DeviceConfig;
/// use dx11_lessons_renderer_d3d11::create_graphics_device;
///
/// let graphics_device = create_graphics_device(&DeviceConfig::default())?;
/// # Ok::<(), dx11_lessons::dx11::Error>(())
/// ```
pub fn create_graphics_device(config: &DeviceConfig) -> Result<GraphicsDevice> {
    let flags = if config.enable_debug_layer {
        D3D11_CREATE_DEVICE_BGRA_SUPPORT | D3D11_CREATE_DEVICE_DEBUG
    } else {
        D3D11_CREATE_DEVICE_BGRA_SUPPORT
    };

    let feature_levels = [D3D_FEATURE_LEVEL_11_1];
    let mut device: Option<ID3D11Device> = None;
    let mut context: Option<ID3D11DeviceContext> = None;
    let mut feature_level = D3D_FEATURE_LEVEL_11_1;

    unsafe {
        D3D11CreateDevice(
            None,
            D3D_DRIVER_TYPE_HARDWARE,
            HMODULE::default(),
            flags,
            Some(&feature_levels),
            D3D11_SDK_VERSION,
            Some(&mut device),
            Some(&mut feature_level),
            Some(&mut context),
        )
    }
    .map_err(|e| {
        dx_error!(SOURCE, "D3D11CreateDevice failed: {}", e);
        Error::InitializationFailed(format!("D3D11CreateDevice failed: {}", e))
    })?;

    let (Some(device), Some(context)) = (device, context) else {
        return Err(Error::InitializationFailed(
            "D3D11CreateDevice returned no device".to_string(),
        ));
    };

    let info_queue = if config.enable_debug_layer {
        device.cast::<ID3D11InfoQueue>().ok()
    } else {
        None
    };

    dx_info!(
        SOURCE,
        "Created D3D11 device (feature level {:#x}, debug layer {})",
        feature_level.0,
        if info_queue.is_some() { "on" } else { "off" }
    );

    let device = D3D11Device {
        device,
        info_queue,
        debug_layer: config.enable_debug_layer,
    };

    Ok(GraphicsDevice::new(
        Rc::new(device),
        Box::new(D3D11Context::new(context)),
        config.clone(),
    ))
}

/// Logical D3D11 device
pub struct D3D11Device {
    device: ID3D11Device,
    info_queue: Option<ID3D11InfoQueue>,
    debug_layer: bool,
}

impl D3D11Device {
    pub fn native(&self) -> &ID3D11Device {
        &self.device
    }

    /// Print pending debug-layer messages
    fn flush_debug_messages(&self) {
        if let Some(queue) = &self.info_queue {
            drain_info_queue(queue);
        }
    }

    /// Common tail of every create call
    fn finish<T>(&self, call: &str, result: windows::core::Result<()>, object: Option<T>) -> Result<T> {
        self.flush_debug_messages();
        result.map_err(|e| native_error(SOURCE, call, e))?;
        created(SOURCE, call, object)
    }

    fn dxgi_adapter(&self) -> Result<IDXGIAdapter> {
        let dxgi_device = self
            .device
            .cast::<IDXGIDevice>()
            .map_err(|e| native_error(SOURCE, "QueryInterface(IDXGIDevice)", e))?;
        unsafe { dxgi_device.GetAdapter() }.map_err(|e| native_error(SOURCE, "GetAdapter", e))
    }

    fn texture_of<'a>(&self, texture: &'a dyn Texture) -> Result<&'a D3D11Texture> {
        texture
            .as_any()
            .downcast_ref::<D3D11Texture>()
            .ok_or_else(|| Error::InvalidResource("texture created by another backend".to_string()))
    }
}

impl Device for D3D11Device {
    // ===== RESOURCES =====

    fn create_buffer(&self, desc: &BufferDesc, initial_data: Option<&[u8]>)
        -> Result<Box<dyn Buffer>>
    {
        let native_desc = buffer_desc_to_d3d11(desc);
        let data = initial_data.map(|bytes| D3D11_SUBRESOURCE_DATA {
            pSysMem: bytes.as_ptr() as *const _,
            SysMemPitch: 0,
            SysMemSlicePitch: 0,
        });

        let mut buffer: Option<ID3D11Buffer> = None;
        let result = unsafe {
            self.device.CreateBuffer(
                &native_desc,
                data.as_ref().map(|d| d as *const _),
                Some(&mut buffer),
            )
        };
        let buffer = self.finish("CreateBuffer", result, buffer)?;
        Ok(Box::new(D3D11Buffer::new(buffer, desc.clone())))
    }

    fn create_texture_2d(
        &self,
        desc: &TextureDesc,
        initial_data: &[SubresourceData<'_>],
    ) -> Result<Box<dyn Texture>> {
        let native_desc = texture_desc_to_d3d11(desc);
        let data: Vec<D3D11_SUBRESOURCE_DATA> = initial_data
            .iter()
            .map(|sub| D3D11_SUBRESOURCE_DATA {
                pSysMem: sub.bytes.as_ptr() as *const _,
                SysMemPitch: sub.row_pitch,
                SysMemSlicePitch: 0,
            })
            .collect();

        let mut texture: Option<ID3D11Texture2D> = None;
        let result = unsafe {
            self.device.CreateTexture2D(
                &native_desc,
                (!data.is_empty()).then(|| data.as_ptr()),
                Some(&mut texture),
            )
        };
        let texture = self.finish("CreateTexture2D", result, texture)?;
        Ok(Box::new(D3D11Texture::new(texture, desc.clone())))
    }

    fn create_render_target_view(&self, texture: &dyn Texture) -> Result<Box<dyn RenderTargetView>> {
        let texture = self.texture_of(texture)?;
        let mut view: Option<ID3D11RenderTargetView> = None;
        let result = unsafe {
            self.device.CreateRenderTargetView(&texture.texture, None, Some(&mut view))
        };
        let view = self.finish("CreateRenderTargetView", result, view)?;
        Ok(Box::new(D3D11RenderTargetView { view }))
    }

    fn create_depth_stencil_view(&self, texture: &dyn Texture) -> Result<Box<dyn DepthStencilView>> {
        let texture = self.texture_of(texture)?;
        let mut view: Option<ID3D11DepthStencilView> = None;
        let result = unsafe {
            self.device.CreateDepthStencilView(&texture.texture, None, Some(&mut view))
        };
        let view = self.finish("CreateDepthStencilView", result, view)?;
        Ok(Box::new(D3D11DepthStencilView { view }))
    }

    fn create_shader_resource_view(
        &self,
        texture: &dyn Texture,
        dimension: SrvDimension,
    ) -> Result<Box<dyn ShaderResourceView>> {
        let texture = self.texture_of(texture)?;
        let desc = texture.desc();

        let native_desc = match dimension {
            SrvDimension::Texture2D => D3D11_SHADER_RESOURCE_VIEW_DESC {
                Format: format_to_dxgi(desc.format),
                ViewDimension: D3D11_SRV_DIMENSION_TEXTURE2D,
                Anonymous: D3D11_SHADER_RESOURCE_VIEW_DESC_0 {
                    Texture2D: D3D11_TEX2D_SRV { MostDetailedMip: 0, MipLevels: desc.mip_levels },
                },
            },
            SrvDimension::TextureCube => D3D11_SHADER_RESOURCE_VIEW_DESC {
                Format: format_to_dxgi(desc.format),
                ViewDimension: D3D11_SRV_DIMENSION_TEXTURECUBE,
                Anonymous: D3D11_SHADER_RESOURCE_VIEW_DESC_0 {
                    TextureCube: D3D11_TEXCUBE_SRV { MostDetailedMip: 0, MipLevels: desc.mip_levels },
                },
            },
        };

        let mut view: Option<ID3D11ShaderResourceView> = None;
        let result = unsafe {
            self.device
                .CreateShaderResourceView(&texture.texture, Some(&native_desc), Some(&mut view))
        };
        let view = self.finish("CreateShaderResourceView", result, view)?;
        Ok(Box::new(D3D11ShaderResourceView { view, dimension }))
    }

    // ===== STATE OBJECTS =====

    fn create_blend_state(&self, desc: &BlendDesc) -> Result<Box<dyn BlendState>> {
        let native_desc = blend_desc_to_d3d11(desc);
        let mut state: Option<ID3D11BlendState> = None;
        let result = unsafe { self.device.CreateBlendState(&native_desc, Some(&mut state)) };
        let state = self.finish("CreateBlendState", result, state)?;
        Ok(Box::new(D3D11BlendState { state }))
    }

    fn create_depth_stencil_state(&self, desc: &DepthStencilDesc)
        -> Result<Box<dyn DepthStencilState>>
    {
        let native_desc = depth_stencil_desc_to_d3d11(desc);
        let mut state: Option<ID3D11DepthStencilState> = None;
        let result = unsafe { self.device.CreateDepthStencilState(&native_desc, Some(&mut state)) };
        let state = self.finish("CreateDepthStencilState", result, state)?;
        Ok(Box::new(D3D11DepthStencilState { state }))
    }

    fn create_rasterizer_state(&self, desc: &RasterizerDesc) -> Result<Box<dyn RasterizerState>> {
        let native_desc = rasterizer_desc_to_d3d11(desc);
        let mut state: Option<ID3D11RasterizerState> = None;
        let result = unsafe { self.device.CreateRasterizerState(&native_desc, Some(&mut state)) };
        let state = self.finish("CreateRasterizerState", result, state)?;
        Ok(Box::new(D3D11RasterizerState { state }))
    }

    fn create_sampler_state(&self, desc: &SamplerDesc) -> Result<Box<dyn SamplerState>> {
        let native_desc = sampler_desc_to_d3d11(desc);
        let mut state: Option<ID3D11SamplerState> = None;
        let result = unsafe { self.device.CreateSamplerState(&native_desc, Some(&mut state)) };
        let state = self.finish("CreateSamplerState", result, state)?;
        Ok(Box::new(D3D11SamplerState { state }))
    }

    fn create_input_layout(
        &self,
        elements: &[InputElementDesc],
        vertex_shader_bytecode: &[u8],
    ) -> Result<Box<dyn InputLayout>> {
        // Semantic names must outlive the call as NUL-terminated strings
        let names = elements
            .iter()
            .map(|e| CString::new(e.semantic_name))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::InvalidResource(format!("bad semantic name: {}", e)))?;

        let native_elements: Vec<D3D11_INPUT_ELEMENT_DESC> = elements
            .iter()
            .zip(&names)
            .map(|(e, name)| D3D11_INPUT_ELEMENT_DESC {
                SemanticName: PCSTR(name.as_ptr() as *const u8),
                SemanticIndex: e.semantic_index,
                Format: format_to_dxgi(e.format),
                InputSlot: e.input_slot,
                AlignedByteOffset: e.aligned_byte_offset,
                InputSlotClass: classification_to_d3d11(e.input_slot_class),
                InstanceDataStepRate: e.instance_data_step_rate,
            })
            .collect();

        let mut layout: Option<ID3D11InputLayout> = None;
        let result = unsafe {
            self.device
                .CreateInputLayout(&native_elements, vertex_shader_bytecode, Some(&mut layout))
        };

        // A signature mismatch is an asset problem, not a device failure
        self.flush_debug_messages();
        if let Err(e) = result {
            dx_error!(SOURCE, "CreateInputLayout failed: {}", e);
            return Err(Error::InvalidResource(format!(
                "input layout does not match the vertex shader signature: {}",
                e
            )));
        }
        let layout = created(SOURCE, "CreateInputLayout", layout)?;
        Ok(Box::new(D3D11InputLayout { layout }))
    }

    fn create_vertex_shader(&self, bytecode: &[u8]) -> Result<Box<dyn VertexShader>> {
        let mut shader: Option<ID3D11VertexShader> = None;
        let result = unsafe { self.device.CreateVertexShader(bytecode, None, Some(&mut shader)) };
        let shader = self.finish("CreateVertexShader", result, shader)?;
        Ok(Box::new(D3D11VertexShader { shader }))
    }

    fn create_pixel_shader(&self, bytecode: &[u8]) -> Result<Box<dyn PixelShader>> {
        let mut shader: Option<ID3D11PixelShader> = None;
        let result = unsafe { self.device.CreatePixelShader(bytecode, None, Some(&mut shader)) };
        let shader = self.finish("CreatePixelShader", result, shader)?;
        Ok(Box::new(D3D11PixelShader { shader }))
    }

    // ===== CAPABILITIES =====

    fn check_multisample_quality_levels(&self, format: Format, sample_count: u32) -> Result<u32> {
        unsafe { self.device.CheckMultisampleQualityLevels(format_to_dxgi(format), sample_count) }
            .map_err(|e| native_error(SOURCE, "CheckMultisampleQualityLevels", e))
    }

    fn display_modes(&self, format: Format) -> Result<Vec<DisplayMode>> {
        let adapter = self.dxgi_adapter()?;
        let output = unsafe { adapter.EnumOutputs(0) }
            .map_err(|e| native_error(SOURCE, "EnumOutputs", e))?;

        let native_format = format_to_dxgi(format);
        let mut count = 0u32;
        unsafe { output.GetDisplayModeList(native_format, DXGI_ENUM_MODES_INTERLACED, &mut count, None) }
            .map_err(|e| native_error(SOURCE, "GetDisplayModeList", e))?;

        let mut modes = vec![DXGI_MODE_DESC::default(); count as usize];
        unsafe {
            output.GetDisplayModeList(
                native_format,
                DXGI_ENUM_MODES_INTERLACED,
                &mut count,
                Some(modes.as_mut_ptr()),
            )
        }
        .map_err(|e| native_error(SOURCE, "GetDisplayModeList", e))?;
        modes.truncate(count as usize);

        dx_debug!(SOURCE, "Output 0 reports {} display modes for {:?}", modes.len(), format);
        Ok(modes
            .iter()
            .map(|mode| DisplayMode {
                width: mode.Width,
                height: mode.Height,
                refresh_rate: rational_from_dxgi(mode.RefreshRate),
                format,
            })
            .collect())
    }

    fn debug_layer_enabled(&self) -> bool {
        self.debug_layer
    }

    // ===== PRESENTATION =====

    fn create_present_surface(
        &self,
        desc: &SwapChainDesc,
        window: RawWindowHandle,
    ) -> Result<Box<dyn PresentSurface>> {
        let hwnd = match window {
            RawWindowHandle::Win32(handle) => HWND(handle.hwnd.get() as _),
            other => {
                return Err(Error::InitializationFailed(format!(
                    "unsupported window handle {:?}",
                    other
                )))
            }
        };

        let mut flags = 0u32;
        if desc.flags.contains(SwapChainFlags::ALLOW_MODE_SWITCH) {
            flags |= DXGI_SWAP_CHAIN_FLAG_ALLOW_MODE_SWITCH.0 as u32;
        }

        let native_desc = DXGI_SWAP_CHAIN_DESC {
            BufferDesc: DXGI_MODE_DESC {
                Width: desc.width,
                Height: desc.height,
                RefreshRate: rational_to_dxgi(desc.refresh_rate),
                Format: format_to_dxgi(desc.format),
                ScanlineOrdering: DXGI_MODE_SCANLINE_ORDER_UNSPECIFIED,
                Scaling: DXGI_MODE_SCALING_UNSPECIFIED,
            },
            SampleDesc: sample_desc_to_dxgi(desc.sample),
            BufferUsage: DXGI_USAGE_RENDER_TARGET_OUTPUT,
            BufferCount: desc.buffer_count,
            OutputWindow: hwnd,
            Windowed: BOOL::from(desc.windowed),
            SwapEffect: swap_effect_to_dxgi(desc.swap_effect),
            Flags: flags,
        };

        let adapter = self.dxgi_adapter()?;
        let factory: IDXGIFactory = unsafe { adapter.GetParent() }
            .map_err(|e| native_error(SOURCE, "GetParent(IDXGIFactory)", e))?;

        let mut swap_chain: Option<IDXGISwapChain> = None;
        let result =
            unsafe { factory.CreateSwapChain(&self.device, &native_desc, &mut swap_chain) }.ok();
        let swap_chain = self.finish("CreateSwapChain", result, swap_chain)?;

        unsafe { factory.MakeWindowAssociation(hwnd, DXGI_MWA_NO_ALT_ENTER | DXGI_MWA_NO_WINDOW_CHANGES) }
            .map_err(|e| native_error(SOURCE, "MakeWindowAssociation", e))?;

        dx_debug!(SOURCE, "Swap chain bound to window, alt-enter disabled");

        Ok(Box::new(D3D11SwapChain::new(swap_chain, *desc, self.info_queue.clone())))
    }
}
