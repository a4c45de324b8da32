/// Mock graphics device for unit tests (no GPU required)
///
/// Every created object and every context command is appended to a shared
/// log that tests inspect through `MockRecorder`.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use raw_window_handle::{RawWindowHandle, WebWindowHandle};

use crate::config::DeviceConfig;
use crate::error::{Error, Result};
use crate::resource::GraphicsDevice;
use crate::window::{Extent2D, RenderWindow};
use super::{
    BindFlags, BlendDesc, BlendState, Buffer, BufferDesc, ClearFlags, CommandContext,
    CpuAccessFlags, DepthStencilDesc, DepthStencilState, DepthStencilView, Device, DisplayMode,
    Format, InputElementDesc, InputLayout, OverlaySurface, PixelShader, PresentFlags,
    PresentOutcome, PresentSurface, PrimitiveTopology, RasterizerDesc, RasterizerState,
    RenderTargetView, ResourceMiscFlags, SamplerDesc, SamplerState, ShaderResourceView,
    SrvDimension, SubresourceData, SwapChainDesc, Texture, TextureDesc, Usage, VertexShader,
    Viewport,
};

// ============================================================================
// Recorded log
// ============================================================================

/// Object created through the mock device
#[derive(Debug, Clone, PartialEq)]
pub enum MockCreated {
    Buffer { id: u64, desc: BufferDesc, data: Option<Vec<u8>> },
    Texture { id: u64, desc: TextureDesc, subresources: Vec<Vec<u8>> },
    RenderTargetView { id: u64, texture: u64 },
    DepthStencilView { id: u64, texture: u64 },
    ShaderResourceView { id: u64, texture: u64, dimension: SrvDimension },
    BlendState { id: u64, desc: BlendDesc },
    DepthStencilState { id: u64, desc: DepthStencilDesc },
    RasterizerState { id: u64, desc: RasterizerDesc },
    SamplerState { id: u64, desc: SamplerDesc },
    InputLayout { id: u64, elements: Vec<InputElementDesc> },
    VertexShader { id: u64 },
    PixelShader { id: u64 },
    PresentSurface { desc: SwapChainDesc },
}

/// Command issued on the mock context or the mock swap chain
#[derive(Debug, Clone, PartialEq)]
pub enum MockCommand {
    SetRenderTargets { rtv: u64, dsv: u64 },
    SetViewport(Viewport),
    ClearRenderTarget { rtv: u64, color: [f32; 4] },
    ClearDepthStencil { dsv: u64, flags: ClearFlags, depth: f32, stencil: u8 },
    SetBlendState { state: u64, blend_factor: [f32; 4], sample_mask: u32 },
    SetDepthStencilState { state: u64, stencil_ref: u32 },
    SetRasterizerState { state: u64 },
    SetPrimitiveTopology(PrimitiveTopology),
    SetInputLayout { layout: u64 },
    SetVertexBuffers { start_slot: u32, buffers: Vec<u64>, strides: Vec<u32>, offsets: Vec<u32> },
    SetIndexBuffer { buffer: u64, format: Format, offset: u32 },
    VsSetShader { shader: u64 },
    PsSetShader { shader: u64 },
    VsSetConstantBuffer { slot: u32, buffer: u64 },
    PsSetConstantBuffer { slot: u32, buffer: u64 },
    VsSetShaderResource { slot: u32, view: u64 },
    PsSetShaderResource { slot: u32, view: u64 },
    PsSetSampler { slot: u32, sampler: u64 },
    WriteDiscard { buffer: u64, data: Vec<u8> },
    DrawIndexed { index_count: u32, start_index: u32, base_vertex: i32 },
    DrawIndexedInstanced {
        index_count: u32,
        instance_count: u32,
        start_index: u32,
        base_vertex: i32,
        start_instance: u32,
    },
    ResizeBuffers { width: u32, height: u32 },
    Present { sync_interval: u32, flags: PresentFlags },
}

#[derive(Debug)]
struct MockState {
    next_id: u64,
    created: Vec<MockCreated>,
    commands: Vec<MockCommand>,
    debug_layer: bool,
    quality_levels: Vec<(u32, u32)>,
    display_modes: Vec<DisplayMode>,
    present_outcome: PresentOutcome,
}

impl MockState {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

type SharedState = Arc<Mutex<MockState>>;

fn record(state: &SharedState, command: MockCommand) {
    state.lock().unwrap().commands.push(command);
}

// ============================================================================
// Recorder (test-side view of the log)
// ============================================================================

/// Test handle over the shared mock log and device knobs
#[derive(Clone)]
pub struct MockRecorder {
    state: SharedState,
}

impl MockRecorder {
    pub fn commands(&self) -> Vec<MockCommand> {
        self.state.lock().unwrap().commands.clone()
    }

    pub fn created(&self) -> Vec<MockCreated> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn clear_commands(&self) {
        self.state.lock().unwrap().commands.clear();
    }

    /// Supported (sample count, quality levels) pairs
    pub fn set_quality_levels(&self, levels: Vec<(u32, u32)>) {
        self.state.lock().unwrap().quality_levels = levels;
    }

    pub fn set_display_modes(&self, modes: Vec<DisplayMode>) {
        self.state.lock().unwrap().display_modes = modes;
    }

    pub fn set_present_outcome(&self, outcome: PresentOutcome) {
        self.state.lock().unwrap().present_outcome = outcome;
    }

    /// Descriptor of the last created buffer
    pub fn last_buffer(&self) -> Option<(BufferDesc, Option<Vec<u8>>)> {
        self.created().into_iter().rev().find_map(|c| match c {
            MockCreated::Buffer { desc, data, .. } => Some((desc, data)),
            _ => None,
        })
    }

    /// Descriptor of the last created texture
    pub fn last_texture(&self) -> Option<(TextureDesc, Vec<Vec<u8>>)> {
        self.created().into_iter().rev().find_map(|c| match c {
            MockCreated::Texture { desc, subresources, .. } => Some((desc, subresources)),
            _ => None,
        })
    }

    /// Data written through `write_discard`, in order
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.commands()
            .into_iter()
            .filter_map(|c| match c {
                MockCommand::WriteDiscard { data, .. } => Some(data),
                _ => None,
            })
            .collect()
    }
}

// ============================================================================
// Mock objects
// ============================================================================

#[derive(Debug)]
pub struct MockBuffer {
    pub id: u64,
    pub desc: BufferDesc,
}

impl Buffer for MockBuffer {
    fn desc(&self) -> &BufferDesc {
        &self.desc
    }
}

#[derive(Debug)]
pub struct MockTexture {
    pub id: u64,
    pub desc: TextureDesc,
}

impl Texture for MockTexture {
    fn desc(&self) -> &TextureDesc {
        &self.desc
    }

    fn surface(&self) -> Result<Box<dyn OverlaySurface>> {
        if !self.desc.bind_flags.contains(BindFlags::RENDER_TARGET) {
            return Err(Error::InvalidResource(format!(
                "texture {} has no render-target binding",
                self.id
            )));
        }
        Ok(Box::new(MockSurface {
            texture: self.id,
            extent: Extent2D::new(self.desc.width, self.desc.height),
        }))
    }
}

#[derive(Debug)]
pub struct MockSurface {
    pub texture: u64,
    pub extent: Extent2D,
}

impl OverlaySurface for MockSurface {
    fn extent(&self) -> Extent2D {
        self.extent
    }
}

/// Generic id-only mock object
#[derive(Debug)]
pub struct MockObject {
    pub id: u64,
}

impl RenderTargetView for MockObject {}
impl DepthStencilView for MockObject {}
impl BlendState for MockObject {}
impl DepthStencilState for MockObject {}
impl RasterizerState for MockObject {}
impl SamplerState for MockObject {}
impl InputLayout for MockObject {}
impl VertexShader for MockObject {}
impl PixelShader for MockObject {}

#[derive(Debug)]
pub struct MockShaderResourceView {
    pub id: u64,
    pub dimension: SrvDimension,
}

impl ShaderResourceView for MockShaderResourceView {
    fn dimension(&self) -> SrvDimension {
        self.dimension
    }
}

/// Id of a mock object behind a trait object (0 if it is not a mock)
fn id_of(object: &dyn std::any::Any) -> u64 {
    if let Some(o) = object.downcast_ref::<MockObject>() {
        o.id
    } else if let Some(b) = object.downcast_ref::<MockBuffer>() {
        b.id
    } else if let Some(t) = object.downcast_ref::<MockTexture>() {
        t.id
    } else if let Some(v) = object.downcast_ref::<MockShaderResourceView>() {
        v.id
    } else {
        0
    }
}

// ============================================================================
// Mock Device
// ============================================================================

pub struct MockDevice {
    state: SharedState,
}

impl MockDevice {
    fn create(&self, make: impl FnOnce(u64) -> MockCreated) -> u64 {
        let mut state = self.state.lock().unwrap();
        let id = state.allocate_id();
        let created = make(id);
        state.created.push(created);
        id
    }
}

impl Device for MockDevice {
    fn create_buffer(&self, desc: &BufferDesc, initial_data: Option<&[u8]>)
        -> Result<Box<dyn Buffer>>
    {
        if desc.byte_width == 0 {
            return Err(Error::InvalidResource("zero-sized buffer".to_string()));
        }
        if desc.usage == Usage::Immutable && initial_data.is_none() {
            return Err(Error::InvalidResource("immutable buffer without data".to_string()));
        }
        if desc.usage == Usage::Dynamic && !desc.cpu_access.contains(CpuAccessFlags::WRITE) {
            return Err(Error::InvalidResource("dynamic buffer without CPU write".to_string()));
        }
        let data = initial_data.map(|d| d.to_vec());
        let id = self.create(|id| MockCreated::Buffer { id, desc: desc.clone(), data });
        Ok(Box::new(MockBuffer { id, desc: desc.clone() }))
    }

    fn create_texture_2d(&self, desc: &TextureDesc, initial_data: &[SubresourceData<'_>])
        -> Result<Box<dyn Texture>>
    {
        if desc.width == 0 || desc.height == 0 {
            return Err(Error::InvalidResource("zero-sized texture".to_string()));
        }
        if desc.misc_flags.contains(ResourceMiscFlags::TEXTURE_CUBE) && desc.array_size != 6 {
            return Err(Error::InvalidResource("cubemap needs 6 slices".to_string()));
        }
        let subresources = initial_data.iter().map(|s| s.bytes.to_vec()).collect();
        let id = self.create(|id| MockCreated::Texture { id, desc: desc.clone(), subresources });
        Ok(Box::new(MockTexture { id, desc: desc.clone() }))
    }

    fn create_render_target_view(&self, texture: &dyn Texture) -> Result<Box<dyn RenderTargetView>> {
        let texture = id_of(texture.as_any());
        let id = self.create(|id| MockCreated::RenderTargetView { id, texture });
        Ok(Box::new(MockObject { id }))
    }

    fn create_depth_stencil_view(&self, texture: &dyn Texture) -> Result<Box<dyn DepthStencilView>> {
        let texture = id_of(texture.as_any());
        let id = self.create(|id| MockCreated::DepthStencilView { id, texture });
        Ok(Box::new(MockObject { id }))
    }

    fn create_shader_resource_view(&self, texture: &dyn Texture, dimension: SrvDimension)
        -> Result<Box<dyn ShaderResourceView>>
    {
        if !texture.desc().bind_flags.contains(BindFlags::SHADER_RESOURCE) {
            return Err(Error::InvalidResource("texture is not shader-visible".to_string()));
        }
        let texture = id_of(texture.as_any());
        let id = self.create(|id| MockCreated::ShaderResourceView { id, texture, dimension });
        Ok(Box::new(MockShaderResourceView { id, dimension }))
    }

    fn create_blend_state(&self, desc: &BlendDesc) -> Result<Box<dyn BlendState>> {
        let id = self.create(|id| MockCreated::BlendState { id, desc: *desc });
        Ok(Box::new(MockObject { id }))
    }

    fn create_depth_stencil_state(&self, desc: &DepthStencilDesc)
        -> Result<Box<dyn DepthStencilState>>
    {
        let id = self.create(|id| MockCreated::DepthStencilState { id, desc: *desc });
        Ok(Box::new(MockObject { id }))
    }

    fn create_rasterizer_state(&self, desc: &RasterizerDesc) -> Result<Box<dyn RasterizerState>> {
        let id = self.create(|id| MockCreated::RasterizerState { id, desc: *desc });
        Ok(Box::new(MockObject { id }))
    }

    fn create_sampler_state(&self, desc: &SamplerDesc) -> Result<Box<dyn SamplerState>> {
        let id = self.create(|id| MockCreated::SamplerState { id, desc: *desc });
        Ok(Box::new(MockObject { id }))
    }

    /// The mock "bytecode" is the whitespace-separated list of semantic
    /// names the shader expects, e.g. `b"POSITION NORMAL TEXCOORD"`.
    fn create_input_layout(&self, elements: &[InputElementDesc], vertex_shader_bytecode: &[u8])
        -> Result<Box<dyn InputLayout>>
    {
        let signature = String::from_utf8_lossy(vertex_shader_bytecode);
        let expected: Vec<&str> = signature.split_whitespace().collect();
        let provided: Vec<&str> = elements.iter().map(|e| e.semantic_name).collect();
        if expected != provided {
            return Err(Error::InvalidResource(format!(
                "input layout {:?} does not match shader signature {:?}",
                provided, expected
            )));
        }
        let elements = elements.to_vec();
        let id = self.create(|id| MockCreated::InputLayout { id, elements });
        Ok(Box::new(MockObject { id }))
    }

    fn create_vertex_shader(&self, bytecode: &[u8]) -> Result<Box<dyn VertexShader>> {
        if bytecode.is_empty() {
            return Err(Error::InvalidResource("empty vertex shader".to_string()));
        }
        let id = self.create(|id| MockCreated::VertexShader { id });
        Ok(Box::new(MockObject { id }))
    }

    fn create_pixel_shader(&self, bytecode: &[u8]) -> Result<Box<dyn PixelShader>> {
        if bytecode.is_empty() {
            return Err(Error::InvalidResource("empty pixel shader".to_string()));
        }
        let id = self.create(|id| MockCreated::PixelShader { id });
        Ok(Box::new(MockObject { id }))
    }

    fn check_multisample_quality_levels(&self, _format: Format, sample_count: u32) -> Result<u32> {
        let state = self.state.lock().unwrap();
        Ok(state
            .quality_levels
            .iter()
            .find(|(count, _)| *count == sample_count)
            .map(|(_, levels)| *levels)
            .unwrap_or(0))
    }

    fn display_modes(&self, format: Format) -> Result<Vec<DisplayMode>> {
        let state = self.state.lock().unwrap();
        Ok(state.display_modes.iter().copied().filter(|m| m.format == format).collect())
    }

    fn debug_layer_enabled(&self) -> bool {
        self.state.lock().unwrap().debug_layer
    }

    fn create_present_surface(&self, desc: &SwapChainDesc, _window: RawWindowHandle)
        -> Result<Box<dyn PresentSurface>>
    {
        self.state
            .lock()
            .unwrap()
            .created
            .push(MockCreated::PresentSurface { desc: *desc });
        Ok(Box::new(MockPresentSurface { state: self.state.clone(), desc: *desc }))
    }
}

// ============================================================================
// Mock Present Surface
// ============================================================================

pub struct MockPresentSurface {
    state: SharedState,
    desc: SwapChainDesc,
}

impl PresentSurface for MockPresentSurface {
    fn desc(&self) -> &SwapChainDesc {
        &self.desc
    }

    fn back_buffer(&self, index: u32) -> Result<Box<dyn Texture>> {
        if index >= self.desc.buffer_count {
            return Err(Error::InvalidResource(format!("no back buffer {}", index)));
        }
        let desc = TextureDesc {
            width: self.desc.width,
            height: self.desc.height,
            mip_levels: 1,
            array_size: 1,
            format: self.desc.format,
            sample: self.desc.sample,
            usage: Usage::Default,
            bind_flags: BindFlags::RENDER_TARGET,
            cpu_access: CpuAccessFlags::empty(),
            misc_flags: ResourceMiscFlags::empty(),
        };
        let id = self.state.lock().unwrap().allocate_id();
        Ok(Box::new(MockTexture { id, desc }))
    }

    fn resize_buffers(&mut self, width: u32, height: u32) -> Result<()> {
        record(&self.state, MockCommand::ResizeBuffers { width, height });
        self.desc.width = width;
        self.desc.height = height;
        Ok(())
    }

    fn present(&mut self, sync_interval: u32, flags: PresentFlags) -> Result<PresentOutcome> {
        record(&self.state, MockCommand::Present { sync_interval, flags });
        Ok(self.state.lock().unwrap().present_outcome)
    }
}

// ============================================================================
// Mock Command Context
// ============================================================================

pub struct MockCommandContext {
    state: SharedState,
}

impl CommandContext for MockCommandContext {
    fn set_render_targets(&mut self, rtv: &dyn RenderTargetView, dsv: &dyn DepthStencilView) {
        record(&self.state, MockCommand::SetRenderTargets {
            rtv: id_of(rtv.as_any()),
            dsv: id_of(dsv.as_any()),
        });
    }

    fn set_viewport(&mut self, viewport: &Viewport) {
        record(&self.state, MockCommand::SetViewport(*viewport));
    }

    fn clear_render_target(&mut self, rtv: &dyn RenderTargetView, color: [f32; 4]) {
        record(&self.state, MockCommand::ClearRenderTarget { rtv: id_of(rtv.as_any()), color });
    }

    fn clear_depth_stencil(&mut self, dsv: &dyn DepthStencilView, flags: ClearFlags, depth: f32, stencil: u8) {
        record(&self.state, MockCommand::ClearDepthStencil {
            dsv: id_of(dsv.as_any()),
            flags,
            depth,
            stencil,
        });
    }

    fn set_blend_state(&mut self, state: &dyn BlendState, blend_factor: [f32; 4], sample_mask: u32) {
        record(&self.state, MockCommand::SetBlendState {
            state: id_of(state.as_any()),
            blend_factor,
            sample_mask,
        });
    }

    fn set_depth_stencil_state(&mut self, state: &dyn DepthStencilState, stencil_ref: u32) {
        record(&self.state, MockCommand::SetDepthStencilState {
            state: id_of(state.as_any()),
            stencil_ref,
        });
    }

    fn set_rasterizer_state(&mut self, state: &dyn RasterizerState) {
        record(&self.state, MockCommand::SetRasterizerState { state: id_of(state.as_any()) });
    }

    fn set_primitive_topology(&mut self, topology: PrimitiveTopology) {
        record(&self.state, MockCommand::SetPrimitiveTopology(topology));
    }

    fn set_input_layout(&mut self, layout: &dyn InputLayout) {
        record(&self.state, MockCommand::SetInputLayout { layout: id_of(layout.as_any()) });
    }

    fn set_vertex_buffers(&mut self, start_slot: u32, buffers: &[&dyn Buffer], strides: &[u32], offsets: &[u32]) {
        record(&self.state, MockCommand::SetVertexBuffers {
            start_slot,
            buffers: buffers.iter().map(|&b| id_of(b.as_any())).collect(),
            strides: strides.to_vec(),
            offsets: offsets.to_vec(),
        });
    }

    fn set_index_buffer(&mut self, buffer: &dyn Buffer, format: Format, offset: u32) {
        record(&self.state, MockCommand::SetIndexBuffer {
            buffer: id_of(buffer.as_any()),
            format,
            offset,
        });
    }

    fn vs_set_shader(&mut self, shader: &dyn VertexShader) {
        record(&self.state, MockCommand::VsSetShader { shader: id_of(shader.as_any()) });
    }

    fn ps_set_shader(&mut self, shader: &dyn PixelShader) {
        record(&self.state, MockCommand::PsSetShader { shader: id_of(shader.as_any()) });
    }

    fn vs_set_constant_buffer(&mut self, slot: u32, buffer: &dyn Buffer) {
        record(&self.state, MockCommand::VsSetConstantBuffer { slot, buffer: id_of(buffer.as_any()) });
    }

    fn ps_set_constant_buffer(&mut self, slot: u32, buffer: &dyn Buffer) {
        record(&self.state, MockCommand::PsSetConstantBuffer { slot, buffer: id_of(buffer.as_any()) });
    }

    fn vs_set_shader_resource(&mut self, slot: u32, view: &dyn ShaderResourceView) {
        record(&self.state, MockCommand::VsSetShaderResource { slot, view: id_of(view.as_any()) });
    }

    fn ps_set_shader_resource(&mut self, slot: u32, view: &dyn ShaderResourceView) {
        record(&self.state, MockCommand::PsSetShaderResource { slot, view: id_of(view.as_any()) });
    }

    fn ps_set_sampler(&mut self, slot: u32, sampler: &dyn SamplerState) {
        record(&self.state, MockCommand::PsSetSampler { slot, sampler: id_of(sampler.as_any()) });
    }

    fn write_discard(&mut self, buffer: &dyn Buffer, data: &[u8]) -> Result<()> {
        if buffer.desc().usage != Usage::Dynamic {
            return Err(Error::InvalidResource("mapping a non-dynamic buffer".to_string()));
        }
        record(&self.state, MockCommand::WriteDiscard {
            buffer: id_of(buffer.as_any()),
            data: data.to_vec(),
        });
        Ok(())
    }

    fn draw_indexed(&mut self, index_count: u32, start_index: u32, base_vertex: i32) {
        record(&self.state, MockCommand::DrawIndexed { index_count, start_index, base_vertex });
    }

    fn draw_indexed_instanced(
        &mut self,
        index_count: u32,
        instance_count: u32,
        start_index: u32,
        base_vertex: i32,
        start_instance: u32,
    ) {
        record(&self.state, MockCommand::DrawIndexedInstanced {
            index_count,
            instance_count,
            start_index,
            base_vertex,
            start_instance,
        });
    }
}

// ============================================================================
// Mock Window
// ============================================================================

/// Window stand-in with a settable client size
pub struct MockWindow {
    size: Cell<Extent2D>,
}

impl MockWindow {
    pub fn new(width: u32, height: u32) -> Self {
        Self { size: Cell::new(Extent2D::new(width, height)) }
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.size.set(Extent2D::new(width, height));
    }
}

impl RenderWindow for MockWindow {
    fn raw_window_handle(&self) -> Result<RawWindowHandle> {
        Ok(RawWindowHandle::Web(WebWindowHandle::new(1)))
    }

    fn client_size(&self) -> Extent2D {
        self.size.get()
    }
}

// ============================================================================
// Constructors
// ============================================================================

/// Build a mock device/context pair and the recorder observing them
pub fn mock_device(config: &DeviceConfig) -> (Rc<dyn Device>, Box<dyn CommandContext>, MockRecorder) {
    let state = Arc::new(Mutex::new(MockState {
        next_id: 0,
        created: Vec::new(),
        commands: Vec::new(),
        debug_layer: config.enable_debug_layer,
        quality_levels: Vec::new(),
        display_modes: Vec::new(),
        present_outcome: PresentOutcome::Presented,
    }));
    let device: Rc<dyn Device> = Rc::new(MockDevice { state: state.clone() });
    let context: Box<dyn CommandContext> = Box::new(MockCommandContext { state: state.clone() });
    (device, context, MockRecorder { state })
}

/// Build a `GraphicsDevice` over the mock backend
pub fn mock_graphics_device(config: DeviceConfig) -> (GraphicsDevice, MockRecorder) {
    let (device, context, recorder) = mock_device(&config);
    (GraphicsDevice::new(device, context, config), recorder)
}

/// Default test config: no debug layer, no vsync
pub fn test_config() -> DeviceConfig {
    DeviceConfig {
        enable_debug_layer: false,
        vsync: false,
        ..DeviceConfig::default()
    }
}
