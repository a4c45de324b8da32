/// D3D11SwapChain - DXGI implementation of the PresentSurface trait

use dx11_lessons::dx11::device::{
    BindFlags, CpuAccessFlags, PresentFlags, PresentOutcome, PresentSurface, ResourceMiscFlags,
    SwapChainDesc, Texture, TextureDesc, Usage,
};
use dx11_lessons::dx11::Result;
use dx11_lessons::{dx_debug, dx_err};
use windows::Win32::Graphics::Direct3D11::{ID3D11InfoQueue, ID3D11Texture2D};
use windows::Win32::Graphics::Dxgi::Common::DXGI_FORMAT_UNKNOWN;
use windows::Win32::Graphics::Dxgi::{
    IDXGISwapChain, DXGI_ERROR_WAS_STILL_DRAWING, DXGI_PRESENT, DXGI_PRESENT_DO_NOT_WAIT,
    DXGI_SWAP_CHAIN_FLAG,
};

use crate::d3d11_convert::native_error;
use crate::d3d11_debug::drain_info_queue;
use crate::d3d11_resources::D3D11Texture;

/// Swap chain bound to one window
pub struct D3D11SwapChain {
    swap_chain: IDXGISwapChain,
    desc: SwapChainDesc,
    info_queue: Option<ID3D11InfoQueue>,
}

impl D3D11SwapChain {
    pub(crate) fn new(
        swap_chain: IDXGISwapChain,
        desc: SwapChainDesc,
        info_queue: Option<ID3D11InfoQueue>,
    ) -> Self {
        Self { swap_chain, desc, info_queue }
    }

    pub fn native(&self) -> &IDXGISwapChain {
        &self.swap_chain
    }

    /// Descriptor of one back buffer as the core sees it
    fn back_buffer_desc(&self) -> TextureDesc {
        TextureDesc {
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
        }
    }
}

impl PresentSurface for D3D11SwapChain {
    fn desc(&self) -> &SwapChainDesc {
        &self.desc
    }

    fn back_buffer(&self, index: u32) -> Result<Box<dyn Texture>> {
        let texture = unsafe { self.swap_chain.GetBuffer::<ID3D11Texture2D>(index) }
            .map_err(|e| native_error("dx11::d3d11::SwapChain", "GetBuffer", e))?;
        Ok(Box::new(D3D11Texture::new(texture, self.back_buffer_desc())))
    }

    fn resize_buffers(&mut self, width: u32, height: u32) -> Result<()> {
        // Count 0 and UNKNOWN keep the current buffer count and format
        unsafe {
            self.swap_chain.ResizeBuffers(
                0,
                width,
                height,
                DXGI_FORMAT_UNKNOWN,
                DXGI_SWAP_CHAIN_FLAG(self.desc.flags.bits() as i32),
            )
        }
        .map_err(|e| native_error("dx11::d3d11::SwapChain", "ResizeBuffers", e))?;

        self.desc.width = width;
        self.desc.height = height;
        dx_debug!("dx11::d3d11::SwapChain", "Resized buffers to {}x{}", width, height);
        Ok(())
    }

    fn present(&mut self, sync_interval: u32, flags: PresentFlags) -> Result<PresentOutcome> {
        let native_flags = if flags.contains(PresentFlags::DO_NOT_WAIT) {
            DXGI_PRESENT_DO_NOT_WAIT
        } else {
            DXGI_PRESENT(0)
        };

        let hr = unsafe { self.swap_chain.Present(sync_interval, native_flags) };

        if let Some(queue) = &self.info_queue {
            drain_info_queue(queue);
        }

        if hr == DXGI_ERROR_WAS_STILL_DRAWING {
            return Ok(PresentOutcome::StillDrawing);
        }
        if hr.is_err() {
            return Err(dx_err!("dx11::d3d11::SwapChain", "Present failed: {}", hr.message()));
        }
        Ok(PresentOutcome::Presented)
    }
}
